//! 触摸拖拽支持
//!
//! 引擎不接触任何平台元素模型：
//! - 落点识别通过宿主提供的 `DropTargetResolver` 完成
//! - 拖拽中的视觉效果以 `DragVisual` 值的形式暴露，由UI层渲染

use serde::{Deserialize, Serialize};

/// 屏幕坐标点
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 矩形区域（左上角 + 右下角）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn center_x(&self) -> f32 {
        (self.min.x + self.max.x) / 2.0
    }

    /// 点是否落在矩形内（含边界）
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// 命中测试结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// 可重排的单词块，携带其在当前排列中的位置
    Reorderable(usize),
    /// 其他元素（背景、按钮等）
    Other,
}

/// 落点解析能力，由宿主UI实现
pub trait DropTargetResolver {
    /// 返回坐标下的所有元素，最上层在前
    fn hits_at(&self, point: Point) -> Vec<HitTarget>;

    /// 选出第一个不是被拖拽单词本身的可重排元素
    fn resolve_drop_target(&self, point: Point, dragged: usize) -> Option<usize> {
        self.hits_at(point).into_iter().find_map(|hit| match hit {
            HitTarget::Reorderable(index) if index != dragged => Some(index),
            _ => None,
        })
    }
}

/// 基于记录下来的矩形的解析器
///
/// UI层每帧把单词块的位置写进来；后写入的视为更靠上层。
#[derive(Debug, Clone, Default)]
pub struct RectResolver {
    items: Vec<(Rect, HitTarget)>,
}

impl RectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// 记录一个可重排单词块
    pub fn push_item(&mut self, index: usize, rect: Rect) {
        self.items.push((rect, HitTarget::Reorderable(index)));
    }

    /// 记录一个非单词元素
    pub fn push_other(&mut self, rect: Rect) {
        self.items.push((rect, HitTarget::Other));
    }

    fn item_rect(&self, index: usize) -> Option<Rect> {
        self.items.iter().find_map(|(rect, hit)| match hit {
            HitTarget::Reorderable(i) if *i == index => Some(*rect),
            _ => None,
        })
    }

    /// 鼠标拖拽用的落点：指针越过目标单词的中线才算命中
    ///
    /// 单词宽度不一，交换后指针可能落在新邻居上；要求越过中线可避免来回交换。
    pub fn resolve_past_midpoint(&self, point: Point, dragged: usize) -> Option<usize> {
        let target = self.resolve_drop_target(point, dragged)?;
        let rect = self.item_rect(target)?;
        let crossed = if target > dragged {
            point.x >= rect.center_x()
        } else {
            point.x <= rect.center_x()
        };
        crossed.then_some(target)
    }
}

impl DropTargetResolver for RectResolver {
    fn hits_at(&self, point: Point) -> Vec<HitTarget> {
        self.items
            .iter()
            .rev()
            .filter(|(rect, _)| rect.contains(point))
            .map(|(_, hit)| *hit)
            .collect()
    }
}

/// 触摸拖拽样式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchStyle {
    /// 拖拽块相对手指向上抬起的距离（像素）
    pub lift_px: f32,
    /// 拖拽块透明度 (0.0 - 1.0)
    pub opacity: f32,
    /// 拖拽块缩放
    pub scale: f32,
}

impl Default for TouchStyle {
    fn default() -> Self {
        Self {
            lift_px: 50.0,
            opacity: 0.8,
            scale: 1.05,
        }
    }
}

/// 拖拽视觉状态
///
/// 单词块脱离正常布局，纵向跟随手指。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragVisual {
    /// 被拖拽单词在排列中的位置
    pub index: usize,
    /// 单词块顶部的纵坐标
    pub top: f32,
    pub opacity: f32,
    pub scale: f32,
    /// 是否绘制在其他元素之上
    pub elevated: bool,
}

impl DragVisual {
    pub fn follow(index: usize, pointer: Point, style: &TouchStyle) -> Self {
        Self {
            index,
            top: pointer.y - style.lift_px,
            opacity: style.opacity,
            scale: style.scale,
            elevated: true,
        }
    }
}
