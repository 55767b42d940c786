//! 判定结果与回调

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// 判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// 判定触发来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    /// 拖拽结束后的自动检查，不锁定排列
    SoftCheck,
    /// 用户提交
    Submit,
}

/// 判定监听器，在引擎创建时注入
pub trait VerdictListener {
    fn on_correct(&mut self, source: VerdictSource);
    fn on_incorrect(&mut self);
}

/// 由两个闭包组成的监听器
pub struct CallbackListener<C, I>
where
    C: FnMut(VerdictSource),
    I: FnMut(),
{
    on_correct: C,
    on_incorrect: I,
}

impl<C, I> CallbackListener<C, I>
where
    C: FnMut(VerdictSource),
    I: FnMut(),
{
    pub fn new(on_correct: C, on_incorrect: I) -> Self {
        Self {
            on_correct,
            on_incorrect,
        }
    }
}

impl<C, I> VerdictListener for CallbackListener<C, I>
where
    C: FnMut(VerdictSource),
    I: FnMut(),
{
    fn on_correct(&mut self, source: VerdictSource) {
        (self.on_correct)(source);
    }

    fn on_incorrect(&mut self) {
        (self.on_incorrect)();
    }
}

/// 一条判定事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictEvent {
    pub verdict: Verdict,
    pub source: VerdictSource,
}

/// 共享的判定队列
///
/// 引擎持有一份克隆作为监听器，宿主每帧取走事件。
#[derive(Debug, Clone, Default)]
pub struct VerdictLog {
    events: Rc<RefCell<VecDeque<VerdictEvent>>>,
}

impl VerdictLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出所有待处理事件
    pub fn drain(&self) -> Vec<VerdictEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl VerdictListener for VerdictLog {
    fn on_correct(&mut self, source: VerdictSource) {
        self.events.borrow_mut().push_back(VerdictEvent {
            verdict: Verdict::Correct,
            source,
        });
    }

    fn on_incorrect(&mut self) {
        self.events.borrow_mut().push_back(VerdictEvent {
            verdict: Verdict::Incorrect,
            source: VerdictSource::Submit,
        });
    }
}
