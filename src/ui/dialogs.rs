//! 对话框组件

use crate::core::models::AppConfig;
use crate::core::verdict::Verdict;
use eframe::egui::{self, RichText};

/// 判定结果对话框
#[derive(Default)]
pub struct ResultDialog {
    /// 是否显示
    pub visible: bool,
    verdict: Option<Verdict>,
    /// 正确答案（答错时展示）
    answer: String,
}

impl ResultDialog {
    /// 显示答对
    pub fn show_correct(&mut self) {
        self.visible = true;
        self.verdict = Some(Verdict::Correct);
        self.answer.clear();
    }

    /// 显示答错，附带正确答案
    pub fn show_incorrect(&mut self, answer: &str) {
        self.visible = true;
        self.verdict = Some(Verdict::Incorrect);
        self.answer = answer.to_string();
    }

    /// 渲染对话框
    pub fn render(&mut self, ctx: &egui::Context) -> ResultDialogResult {
        let mut result = ResultDialogResult::None;

        if !self.visible {
            return result;
        }
        let Some(verdict) = self.verdict else {
            return result;
        };

        egui::Window::new("结果")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| match verdict {
                    Verdict::Correct => {
                        ui.label(
                            RichText::new("🎉 太棒了，完全正确！")
                                .size(22.0)
                                .color(egui::Color32::from_rgb(52, 168, 83)),
                        );
                    }
                    Verdict::Incorrect => {
                        ui.label(
                            RichText::new("😅 还不对哦")
                                .size(22.0)
                                .color(egui::Color32::from_rgb(234, 67, 53)),
                        );
                        ui.add_space(8.0);
                        ui.label("正确的句子是：");
                        ui.label(RichText::new(&self.answer).size(18.0).strong());
                    }
                });

                ui.separator();

                ui.horizontal(|ui| {
                    if verdict == Verdict::Incorrect && ui.button("🔄 再试一次").clicked() {
                        result = ResultDialogResult::Retry;
                        self.visible = false;
                    }
                    if ui.button("➡ 下一题").clicked() {
                        result = ResultDialogResult::Next;
                        self.visible = false;
                    }
                });
            });

        result
    }
}

/// 结果对话框返回
#[derive(Debug, PartialEq)]
pub enum ResultDialogResult {
    None,
    Retry,
    Next,
}

/// 设置对话框
pub struct SettingsDialog {
    /// 是否显示
    pub visible: bool,
    /// 触摸抬起距离
    pub lift_px: f32,
    /// 拖拽透明度
    pub opacity: f32,
    /// 拖拽缩放
    pub scale: f32,
    /// 自动检查
    pub auto_check: bool,
    /// 显示释义
    pub show_translation: bool,
    /// 是否固定随机种子
    pub use_seed: bool,
    pub seed: u64,
}

impl Default for SettingsDialog {
    fn default() -> Self {
        let config = AppConfig::default();
        Self {
            visible: false,
            lift_px: config.touch_style.lift_px,
            opacity: config.touch_style.opacity,
            scale: config.touch_style.scale,
            auto_check: config.auto_check,
            show_translation: config.show_translation,
            use_seed: false,
            seed: 0,
        }
    }
}

impl SettingsDialog {
    pub fn load_from_config(&mut self, config: &AppConfig) {
        self.lift_px = config.touch_style.lift_px;
        self.opacity = config.touch_style.opacity;
        self.scale = config.touch_style.scale;
        self.auto_check = config.auto_check;
        self.show_translation = config.show_translation;
        self.use_seed = config.shuffle_seed.is_some();
        self.seed = config.shuffle_seed.unwrap_or(0);
    }

    /// 写回配置
    pub fn apply_to_config(&self, config: &mut AppConfig) {
        config.touch_style.lift_px = self.lift_px;
        config.touch_style.opacity = self.opacity;
        config.touch_style.scale = self.scale;
        config.auto_check = self.auto_check;
        config.show_translation = self.show_translation;
        config.shuffle_seed = self.use_seed.then_some(self.seed);
    }

    /// 渲染对话框
    pub fn render(&mut self, ctx: &egui::Context) -> SettingsResult {
        let mut result = SettingsResult::None;

        if !self.visible {
            return result;
        }

        egui::Window::new("⚙ 设置")
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.heading("练习");
                ui.checkbox(&mut self.auto_check, "拖到正确顺序就算答对");
                ui.checkbox(&mut self.show_translation, "显示中文释义");

                ui.separator();
                ui.heading("触摸拖拽");
                ui.add(egui::Slider::new(&mut self.lift_px, 0.0..=120.0).text("抬起距离 (px)"));
                ui.add(egui::Slider::new(&mut self.opacity, 0.2..=1.0).text("透明度"));
                ui.add(egui::Slider::new(&mut self.scale, 1.0..=1.5).text("放大倍数"));

                ui.separator();
                ui.horizontal(|ui| {
                    ui.checkbox(&mut self.use_seed, "固定打乱顺序");
                    ui.add_enabled(self.use_seed, egui::DragValue::new(&mut self.seed));
                });
                ui.label(
                    RichText::new("（调试用，新开课程时生效）")
                        .small()
                        .color(egui::Color32::GRAY),
                );

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("💾 保存").clicked() {
                        result = SettingsResult::Save;
                        self.visible = false;
                    }
                    if ui.button("↺ 恢复默认").clicked() {
                        self.load_from_config(&AppConfig::default());
                    }
                    if ui.button("✗ 取消").clicked() {
                        result = SettingsResult::Cancel;
                        self.visible = false;
                    }
                });
            });

        result
    }
}

/// 设置对话框结果
#[derive(Debug, PartialEq)]
pub enum SettingsResult {
    None,
    Save,
    Cancel,
}
