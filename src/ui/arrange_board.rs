//! 单词排序面板
//!
//! 把排序引擎画成一排可拖拽的单词块：
//! - 鼠标拖拽：单词跟随经过的位置重排
//! - 触摸拖拽：单词块脱离布局浮在手指上方
//! - 键盘：点选单词后用左右方向键挪动，回车提交

use crate::core::arrangement::ArrangementEngine;
use crate::core::touch::{Point, Rect, RectResolver};
use crate::ui::styles::{chip_stroke, default_rounding, Theme};
use eframe::egui::{self, FontId, Sense, Ui};

const CHIP_PADDING: egui::Vec2 = egui::vec2(14.0, 10.0);
const CHIP_FONT_SIZE: f32 = 24.0;

fn to_point(p: egui::Pos2) -> Point {
    Point::new(p.x, p.y)
}

fn to_rect(r: egui::Rect) -> Rect {
    Rect::new(to_point(r.min), to_point(r.max))
}

/// 面板产生的动作
#[derive(Debug, PartialEq)]
pub enum BoardAction {
    None,
    Submit,
}

/// 本帧收集的输入
enum ChipInput {
    Start(usize, Point),
    Move(Point),
    End,
}

/// 单词排序面板
pub struct ArrangeBoard {
    theme: Theme,
    /// 上一帧的单词块布局
    resolver: RectResolver,
    /// 当前拖拽是否来自触摸
    touch_drag: bool,
    /// 键盘选中的单词位置
    keyboard_focus: Option<usize>,
}

impl Default for ArrangeBoard {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            resolver: RectResolver::new(),
            touch_drag: false,
            keyboard_focus: None,
        }
    }
}

impl ArrangeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 换题时清空交互状态
    pub fn reset(&mut self) {
        self.resolver.clear();
        self.touch_drag = false;
        self.keyboard_focus = None;
    }

    /// 渲染面板并把输入交给引擎
    pub fn render(&mut self, ui: &mut Ui, engine: &mut ArrangementEngine) -> BoardAction {
        let words = engine.arrangement().to_vec();
        let active = engine.active_index();
        let visual = engine.drag_visual();
        let locked = engine.is_submitted();

        let mut inputs = Vec::new();
        let mut layout = RectResolver::new();
        let font = FontId::proportional(CHIP_FONT_SIZE);
        let sense = if locked {
            Sense::hover()
        } else {
            Sense::click_and_drag()
        };

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(12.0, 16.0);

            for (i, word) in words.iter().enumerate() {
                let galley =
                    ui.painter()
                        .layout_no_wrap(word.clone(), font.clone(), self.theme.chip_text);
                let size = galley.size() + CHIP_PADDING * 2.0;
                let (rect, response) = ui.allocate_exact_size(size, sense);
                layout.push_item(i, to_rect(rect));

                let highlighted = active == Some(i) || self.keyboard_focus == Some(i);
                let fill = if locked {
                    self.theme.chip_locked_bg
                } else if highlighted {
                    self.theme.chip_active_bg
                } else {
                    self.theme.chip_bg
                };

                match visual {
                    Some(v) if v.index == i => {
                        // 原位置留一个虚框
                        ui.painter()
                            .rect_stroke(rect, default_rounding(), chip_stroke());

                        let floating = egui::Rect::from_min_size(
                            egui::pos2(rect.min.x, v.top),
                            rect.size(),
                        );
                        let floating =
                            egui::Rect::from_center_size(floating.center(), floating.size() * v.scale);
                        let layer = if v.elevated {
                            egui::Order::Tooltip
                        } else {
                            egui::Order::Foreground
                        };
                        let painter = ui
                            .ctx()
                            .layer_painter(egui::LayerId::new(layer, egui::Id::new("dragged_word")));
                        painter.rect(
                            floating,
                            default_rounding(),
                            fill.gamma_multiply(v.opacity),
                            chip_stroke(),
                        );
                        painter.galley(
                            floating.center() - galley.size() / 2.0,
                            galley,
                            self.theme.chip_text,
                        );
                    }
                    _ => {
                        ui.painter()
                            .rect(rect, default_rounding(), fill, chip_stroke());
                        ui.painter().galley(
                            rect.center() - galley.size() / 2.0,
                            galley,
                            self.theme.chip_text,
                        );
                    }
                }

                if locked {
                    continue;
                }
                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        inputs.push(ChipInput::Start(i, to_point(pos)));
                    }
                } else if response.clicked() {
                    self.keyboard_focus = Some(i);
                }
            }
        });

        self.resolver = layout;

        // 拖拽中单词位置会变，这里按全局指针状态跟踪，不依赖单个块的响应
        if !locked && (active.is_some() || !inputs.is_empty()) {
            let (down, pos) = ui.input(|i| (i.pointer.primary_down(), i.pointer.latest_pos()));
            match (down, pos) {
                (true, Some(pos)) => inputs.push(ChipInput::Move(to_point(pos))),
                (false, _) => inputs.push(ChipInput::End),
                _ => {}
            }
            ui.ctx().request_repaint();
        }

        let touching = ui.input(|i| i.any_touches());
        for input in inputs {
            self.apply(engine, input, touching);
        }

        let mut action = BoardAction::None;
        if !locked {
            action = self.handle_keyboard(ui, engine);
        }
        action
    }

    fn apply(&mut self, engine: &mut ArrangementEngine, input: ChipInput, touching: bool) {
        let result = match input {
            ChipInput::Start(index, pos) => {
                self.keyboard_focus = None;
                self.touch_drag = touching;
                if touching {
                    engine.touch_start(index, pos)
                } else {
                    engine.begin_move(index)
                }
            }
            ChipInput::Move(pos) => {
                if self.touch_drag {
                    engine.touch_move(pos, &self.resolver).map(|_| ())
                } else {
                    match engine.active_index() {
                        Some(dragged) => match self.resolver.resolve_past_midpoint(pos, dragged) {
                            Some(target) => engine.update_move_target(target).map(|_| ()),
                            None => Ok(()),
                        },
                        None => Ok(()),
                    }
                }
            }
            ChipInput::End => {
                if self.touch_drag {
                    engine.touch_end();
                } else {
                    engine.end_move();
                }
                self.touch_drag = false;
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::warn!("忽略无效的拖拽输入: {}", e);
        }
    }

    fn handle_keyboard(&mut self, ui: &Ui, engine: &mut ArrangementEngine) -> BoardAction {
        let (left, right, enter) = ui.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Enter),
            )
        });

        // 其他控件（如设置里的输入框）持有焦点时不处理按键
        let widget_focused = ui.memory(|m| m.focused().is_some());
        let Some(index) = board_key_target(self.keyboard_focus, widget_focused) else {
            return BoardAction::None;
        };
        if enter {
            return BoardAction::Submit;
        }

        let delta = match (left, right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => return BoardAction::None,
        };

        match engine.nudge(index, delta) {
            Ok(true) => {
                self.keyboard_focus = Some(index.saturating_add_signed(delta));
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("键盘移动失败: {}", e);
                self.keyboard_focus = None;
            }
        }
        BoardAction::None
    }
}

/// 方向键和回车只在面板选中了单词、且没有其他控件持有焦点时生效
fn board_key_target(board_focus: Option<usize>, widget_focused: bool) -> Option<usize> {
    if widget_focused {
        return None;
    }
    board_focus
}
