//! 单词排序引擎
//!
//! 把句子拆成单词并打乱，供用户通过鼠标或触摸拖拽重排，
//! 最终与原句比较得出判定。
//!
//! 状态：空闲 → 拖拽中 → 空闲（自动检查）→ … → 已提交（终态）

use crate::core::error::ArrangeError;
use crate::core::touch::{DragVisual, DropTargetResolver, Point, TouchStyle};
use crate::core::verdict::{Verdict, VerdictListener, VerdictSource};
use rand::seq::SliceRandom;
use rand::Rng;

/// 按空白拆分句子
pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence.split_whitespace().map(str::to_string).collect()
}

/// 单词排序引擎
pub struct ArrangementEngine {
    /// 原句单词（标准答案）
    sentence: Vec<String>,
    /// 当前排列
    arrangement: Vec<String>,
    /// 正在拖拽的单词位置
    active: Option<usize>,
    /// 已提交后只读
    submitted: Option<Verdict>,
    /// 触摸拖拽时手指位置
    touch_pointer: Option<Point>,
    touch_style: TouchStyle,
    listener: Box<dyn VerdictListener>,
}

impl ArrangementEngine {
    /// 拆分句子并用给定随机源打乱
    pub fn new<R: Rng + ?Sized>(
        sentence: &str,
        rng: &mut R,
        listener: Box<dyn VerdictListener>,
    ) -> Result<Self, ArrangeError> {
        let tokens = tokenize(sentence);
        if tokens.is_empty() {
            return Err(ArrangeError::EmptySentence);
        }

        let mut arrangement = tokens.clone();
        arrangement.shuffle(rng);

        tracing::debug!("新挑战: {} 个单词", tokens.len());
        Ok(Self::from_parts(tokens, arrangement, listener))
    }

    /// 使用指定的初始排列
    pub fn with_arrangement(
        sentence: &str,
        arrangement: Vec<String>,
        listener: Box<dyn VerdictListener>,
    ) -> Result<Self, ArrangeError> {
        let tokens = tokenize(sentence);
        if tokens.is_empty() {
            return Err(ArrangeError::EmptySentence);
        }

        let mut expected = tokens.clone();
        let mut given = arrangement.clone();
        expected.sort();
        given.sort();
        if expected != given {
            return Err(ArrangeError::NotAPermutation);
        }

        Ok(Self::from_parts(tokens, arrangement, listener))
    }

    fn from_parts(
        sentence: Vec<String>,
        arrangement: Vec<String>,
        listener: Box<dyn VerdictListener>,
    ) -> Self {
        Self {
            sentence,
            arrangement,
            active: None,
            submitted: None,
            touch_pointer: None,
            touch_style: TouchStyle::default(),
            listener,
        }
    }

    /// 设置触摸拖拽样式
    pub fn set_touch_style(&mut self, style: TouchStyle) {
        self.touch_style = style;
    }

    pub fn sentence(&self) -> &[String] {
        &self.sentence
    }

    pub fn arrangement(&self) -> &[String] {
        &self.arrangement
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }

    /// 提交后的判定
    pub fn verdict(&self) -> Option<Verdict> {
        self.submitted
    }

    /// 当前排列是否与原句完全一致
    pub fn is_correct(&self) -> bool {
        self.arrangement.join(" ") == self.sentence.join(" ")
    }

    fn check_index(&self, index: usize) -> Result<(), ArrangeError> {
        if index < self.arrangement.len() {
            Ok(())
        } else {
            Err(ArrangeError::IndexOutOfRange {
                index,
                len: self.arrangement.len(),
            })
        }
    }

    /// 开始拖拽
    pub fn begin_move(&mut self, index: usize) -> Result<(), ArrangeError> {
        if self.is_submitted() {
            return Ok(());
        }
        self.check_index(index)?;
        self.active = Some(index);
        Ok(())
    }

    /// 把拖拽中的单词移到目标位置，返回排列是否变化
    pub fn update_move_target(&mut self, target: usize) -> Result<bool, ArrangeError> {
        if self.is_submitted() {
            return Ok(false);
        }
        let Some(from) = self.active else {
            return Ok(false);
        };
        self.check_index(target)?;
        if from == target {
            return Ok(false);
        }

        let token = self.arrangement.remove(from);
        self.arrangement.insert(target, token);
        self.active = Some(target);
        Ok(true)
    }

    /// 结束拖拽并做一次自动检查
    ///
    /// 排列恰好正确时触发正确回调，但不锁定，用户仍可继续拖拽。
    pub fn end_move(&mut self) -> bool {
        self.touch_pointer = None;
        if self.is_submitted() || self.active.take().is_none() {
            return false;
        }

        let correct = self.is_correct();
        if correct {
            tracing::debug!("拖拽结束，排列已正确");
            self.listener.on_correct(VerdictSource::SoftCheck);
        }
        correct
    }

    /// 提交答案，之后排列只读
    ///
    /// 重复提交直接返回已有判定，不再触发回调。
    pub fn submit(&mut self) -> Verdict {
        if let Some(verdict) = self.submitted {
            return verdict;
        }

        self.active = None;
        self.touch_pointer = None;

        let verdict = if self.is_correct() {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        self.submitted = Some(verdict);

        tracing::info!("提交答案: {:?} ({})", verdict, self.arrangement.join(" "));
        match verdict {
            Verdict::Correct => self.listener.on_correct(VerdictSource::Submit),
            Verdict::Incorrect => self.listener.on_incorrect(),
        }
        verdict
    }

    /// 触摸开始
    pub fn touch_start(&mut self, index: usize, pointer: Point) -> Result<(), ArrangeError> {
        if self.is_submitted() {
            return Ok(());
        }
        self.begin_move(index)?;
        self.touch_pointer = Some(pointer);
        Ok(())
    }

    /// 触摸移动：更新手指位置，并按命中结果重排
    ///
    /// 手指下没有可放置的单词时排列不变。
    pub fn touch_move(
        &mut self,
        pointer: Point,
        resolver: &dyn DropTargetResolver,
    ) -> Result<bool, ArrangeError> {
        if self.is_submitted() {
            return Ok(false);
        }
        let Some(dragged) = self.active else {
            return Ok(false);
        };
        self.touch_pointer = Some(pointer);

        match resolver.resolve_drop_target(pointer, dragged) {
            Some(target) => self.update_move_target(target),
            None => Ok(false),
        }
    }

    /// 触摸结束
    pub fn touch_end(&mut self) -> bool {
        self.end_move()
    }

    /// 触摸拖拽中的视觉状态
    pub fn drag_visual(&self) -> Option<DragVisual> {
        match (self.active, self.touch_pointer) {
            (Some(index), Some(pointer)) => {
                Some(DragVisual::follow(index, pointer, &self.touch_style))
            }
            _ => None,
        }
    }

    /// 键盘移动：把单词左右挪动若干位
    pub fn nudge(&mut self, index: usize, delta: isize) -> Result<bool, ArrangeError> {
        if self.is_submitted() {
            return Ok(false);
        }
        self.check_index(index)?;

        let last = self.arrangement.len() - 1;
        let target = index.saturating_add_signed(delta).min(last);
        self.begin_move(index)?;
        let moved = self.update_move_target(target)?;
        self.end_move();
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::touch::{Rect, RectResolver};
    use crate::core::verdict::{CallbackListener, VerdictLog};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    fn engine_with(sentence: &str, order: &[&str]) -> (ArrangementEngine, VerdictLog) {
        let log = VerdictLog::new();
        let engine =
            ArrangementEngine::with_arrangement(sentence, words(order), Box::new(log.clone()))
                .unwrap();
        (engine, log)
    }

    #[test]
    fn test_shuffle_keeps_tokens() {
        let sentence = "the quick brown fox jumps over the lazy dog";
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let engine =
                ArrangementEngine::new(sentence, &mut rng, Box::new(VerdictLog::new())).unwrap();
            assert_eq!(
                sorted(engine.arrangement().to_vec()),
                sorted(tokenize(sentence))
            );
        }
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  I\tlike \n apples "), words(&["I", "like", "apples"]));
    }

    #[test]
    fn test_empty_sentence_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = ArrangementEngine::new("   ", &mut rng, Box::new(VerdictLog::new()));
        assert_eq!(result.err(), Some(ArrangeError::EmptySentence));
    }

    #[test]
    fn test_with_arrangement_rejects_foreign_tokens() {
        let result = ArrangementEngine::with_arrangement(
            "I like apples",
            words(&["I", "like", "pears"]),
            Box::new(VerdictLog::new()),
        );
        assert_eq!(result.err(), Some(ArrangeError::NotAPermutation));
    }

    #[test]
    fn test_drag_to_correct_order() {
        let (mut engine, log) = engine_with("I like apples", &["apples", "I", "like"]);

        engine.begin_move(1).unwrap();
        assert!(engine.update_move_target(0).unwrap());
        engine.end_move();
        assert_eq!(engine.arrangement(), words(&["I", "apples", "like"]).as_slice());

        engine.begin_move(2).unwrap();
        engine.update_move_target(1).unwrap();
        // 此时已经正确，自动检查应触发一次
        assert!(engine.end_move());
        assert_eq!(engine.arrangement(), words(&["I", "like", "apples"]).as_slice());
        assert!(!engine.is_submitted());

        let soft = log.drain();
        assert_eq!(soft.len(), 1);
        assert_eq!(soft[0].source, VerdictSource::SoftCheck);

        assert_eq!(engine.submit(), Verdict::Correct);
        let events = log.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].verdict, Verdict::Correct);
        assert_eq!(events[0].source, VerdictSource::Submit);
    }

    #[test]
    fn test_incorrect_submit_keeps_arrangement() {
        let (mut engine, log) = engine_with("The cat sat", &["cat", "The", "sat"]);

        assert_eq!(engine.submit(), Verdict::Incorrect);
        assert_eq!(engine.arrangement(), words(&["cat", "The", "sat"]).as_slice());

        let events = log.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].verdict, Verdict::Incorrect);
    }

    #[test]
    fn test_submit_fires_callback_once() {
        let correct = Rc::new(Cell::new(0));
        let incorrect = Rc::new(Cell::new(0));
        let listener = {
            let correct = correct.clone();
            let incorrect = incorrect.clone();
            CallbackListener::new(
                move |_| correct.set(correct.get() + 1),
                move || incorrect.set(incorrect.get() + 1),
            )
        };
        let mut engine = ArrangementEngine::with_arrangement(
            "The cat sat",
            words(&["The", "cat", "sat"]),
            Box::new(listener),
        )
        .unwrap();

        engine.submit();
        engine.submit();
        assert_eq!(correct.get(), 1);
        assert_eq!(incorrect.get(), 0);
    }

    #[test]
    fn test_moves_ignored_after_submit() {
        let (mut engine, _log) = engine_with("The cat sat", &["cat", "The", "sat"]);
        engine.submit();

        engine.begin_move(0).unwrap();
        assert!(!engine.update_move_target(2).unwrap());
        assert_eq!(engine.active_index(), None);
        assert!(!engine.nudge(0, 1).unwrap());
        assert_eq!(engine.arrangement(), words(&["cat", "The", "sat"]).as_slice());
    }

    #[test]
    fn test_touch_ignored_after_submit() {
        let (mut engine, log) = engine_with("a b c", &["c", "a", "b"]);
        let mut resolver = RectResolver::new();
        for i in 0..3 {
            let x = i as f32 * 50.0;
            resolver.push_item(i, Rect::new(Point::new(x, 0.0), Point::new(x + 40.0, 20.0)));
        }

        assert_eq!(engine.submit(), Verdict::Incorrect);
        log.drain();

        engine.touch_start(0, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(engine.active_index(), None);
        assert!(engine.drag_visual().is_none());
        assert!(!engine.touch_move(Point::new(110.0, 10.0), &resolver).unwrap());
        assert!(!engine.touch_end());
        assert_eq!(engine.arrangement(), words(&["c", "a", "b"]).as_slice());
        assert!(log.is_empty());
    }

    #[test]
    fn test_submit_clears_drag_in_progress() {
        let (mut engine, log) = engine_with("a b", &["a", "b"]);
        engine.touch_start(1, Point::new(5.0, 5.0)).unwrap();
        assert!(engine.drag_visual().is_some());

        assert_eq!(engine.submit(), Verdict::Correct);
        assert!(engine.drag_visual().is_none());

        // 提交后结束拖拽不再触发回调
        assert!(!engine.end_move());
        assert!(!engine.touch_end());
        let events = log.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source, VerdictSource::Submit);
    }

    #[test]
    fn test_repeated_target_is_idempotent() {
        let (mut engine, _log) = engine_with("a b c d", &["d", "c", "b", "a"]);
        engine.begin_move(0).unwrap();
        assert!(engine.update_move_target(2).unwrap());
        let snapshot = engine.arrangement().to_vec();
        assert!(!engine.update_move_target(2).unwrap());
        assert!(!engine.update_move_target(2).unwrap());
        assert_eq!(engine.arrangement(), snapshot.as_slice());
        assert_eq!(engine.active_index(), Some(2));
    }

    #[test]
    fn test_out_of_range_index() {
        let (mut engine, _log) = engine_with("a b", &["b", "a"]);
        assert_eq!(
            engine.begin_move(5),
            Err(ArrangeError::IndexOutOfRange { index: 5, len: 2 })
        );
        engine.begin_move(0).unwrap();
        assert!(engine.update_move_target(2).is_err());
    }

    #[test]
    fn test_random_moves_preserve_multiset() {
        let mut rng = StdRng::seed_from_u64(42);
        let sentence = "my sister has two small brown dogs";
        let mut engine =
            ArrangementEngine::new(sentence, &mut rng, Box::new(VerdictLog::new())).unwrap();
        let len = engine.arrangement().len();

        for _ in 0..200 {
            let from = rng.gen_range(0..len);
            engine.begin_move(from).unwrap();
            for _ in 0..3 {
                engine.update_move_target(rng.gen_range(0..len)).unwrap();
            }
            engine.end_move();
        }
        assert_eq!(
            sorted(engine.arrangement().to_vec()),
            sorted(tokenize(sentence))
        );
    }

    #[test]
    fn test_end_move_without_drag_is_silent() {
        let (mut engine, log) = engine_with("a b", &["a", "b"]);
        assert!(!engine.end_move());
        assert!(log.is_empty());
    }

    #[test]
    fn test_touch_move_without_target_is_noop() {
        let (mut engine, _log) = engine_with("a b c", &["c", "b", "a"]);
        let mut resolver = RectResolver::new();
        resolver.push_item(
            0,
            Rect::new(Point::new(0.0, 0.0), Point::new(40.0, 20.0)),
        );

        engine.touch_start(0, Point::new(10.0, 10.0)).unwrap();
        // 手指下只有被拖拽的单词自己
        assert!(!engine.touch_move(Point::new(10.0, 10.0), &resolver).unwrap());
        // 空白处
        assert!(!engine.touch_move(Point::new(300.0, 300.0), &resolver).unwrap());
        assert_eq!(engine.arrangement(), words(&["c", "b", "a"]).as_slice());
    }

    #[test]
    fn test_touch_drag_reorders_and_exposes_visual() {
        let (mut engine, log) = engine_with("a b c", &["c", "a", "b"]);
        let mut resolver = RectResolver::new();
        for i in 0..3 {
            let x = i as f32 * 50.0;
            resolver.push_item(i, Rect::new(Point::new(x, 0.0), Point::new(x + 40.0, 20.0)));
        }

        engine.touch_start(0, Point::new(10.0, 10.0)).unwrap();
        let visual = engine.drag_visual().unwrap();
        assert_eq!(visual.index, 0);
        assert_eq!(visual.top, 10.0 - TouchStyle::default().lift_px);

        assert!(engine.touch_move(Point::new(110.0, 10.0), &resolver).unwrap());
        assert_eq!(engine.arrangement(), words(&["a", "b", "c"]).as_slice());
        assert_eq!(engine.active_index(), Some(2));

        assert!(engine.touch_end());
        assert!(engine.drag_visual().is_none());
        assert_eq!(log.drain().len(), 1);
    }

    #[test]
    fn test_nudge_clamps_to_bounds() {
        let (mut engine, _log) = engine_with("a b c", &["b", "c", "a"]);
        assert!(engine.nudge(2, -5).unwrap());
        assert_eq!(engine.arrangement(), words(&["a", "b", "c"]).as_slice());
        assert!(!engine.nudge(2, 3).unwrap());
    }
}
