//! 样式定义

use eframe::egui::{self, Color32, Rounding, Stroke};

/// 颜色主题
pub struct Theme {
    pub primary: Color32,
    pub success: Color32,
    pub error: Color32,
    /// 单词块底色
    pub chip_bg: Color32,
    /// 拖拽中/选中单词块底色
    pub chip_active_bg: Color32,
    pub chip_text: Color32,
    /// 已提交后的单词块底色
    pub chip_locked_bg: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color32::from_rgb(66, 133, 244),      // 蓝色
            success: Color32::from_rgb(52, 168, 83),       // 绿色
            error: Color32::from_rgb(234, 67, 53),         // 红色
            chip_bg: Color32::from_rgb(255, 236, 179),     // 浅黄
            chip_active_bg: Color32::from_rgb(255, 193, 7), // 琥珀色
            chip_text: Color32::from_rgb(33, 33, 33),
            chip_locked_bg: Color32::from_gray(220),
        }
    }
}

impl Theme {
    /// 正确率对应的颜色
    pub fn accuracy_color(&self, accuracy: f32) -> Color32 {
        if accuracy >= 0.8 {
            self.success
        } else if accuracy >= 0.5 {
            self.primary
        } else {
            self.error
        }
    }
}

/// 圆角设置
pub fn default_rounding() -> Rounding {
    Rounding::same(8.0)
}

/// 按钮样式
pub fn button_style(visuals: &mut egui::Visuals) {
    visuals.widgets.inactive.rounding = default_rounding();
    visuals.widgets.hovered.rounding = default_rounding();
    visuals.widgets.active.rounding = default_rounding();
}

/// 单词块边框
pub fn chip_stroke() -> Stroke {
    Stroke::new(1.5, Color32::from_gray(160))
}
