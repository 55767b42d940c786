//! Word Arrange - 英语连词成句练习
//!
//! 把打乱的单词拖回正确的顺序：
//! - 鼠标、触摸、键盘都可以重排
//! - 排序逻辑与界面完全分离
//! - 答错可以重试，也可以看答案进入下一题

pub mod core;
pub mod ui;
pub mod storage;

use anyhow::Result;
use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use storage::config::ConfigManager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 配置中文字体
fn setup_custom_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();

    // 尝试加载系统中文字体
    let font_paths = [
        "C:/Windows/Fonts/msyh.ttc",                          // 微软雅黑
        "C:/Windows/Fonts/simhei.ttf",                        // 黑体
        "/System/Library/Fonts/PingFang.ttc",                 // 苹方
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    let mut font_loaded = false;
    for path in &font_paths {
        if let Ok(font_data) = std::fs::read(path) {
            fonts.font_data.insert(
                "chinese_font".to_owned(),
                FontData::from_owned(font_data).into(),
            );

            // 中文字体作为后备，英文仍用默认字体
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("chinese_font".to_owned());

            font_loaded = true;
            tracing::info!("已加载中文字体: {}", path);
            break;
        }
    }

    if !font_loaded {
        tracing::warn!("未能加载中文字体，界面可能显示乱码");
    }

    ctx.set_fonts(fonts);
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("启动 Word Arrange");

    let config_manager = ConfigManager::new(ConfigManager::default_path());
    tracing::debug!("配置文件: {}", config_manager.path().display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 700.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Word Arrange - 连词成句"),
        ..Default::default()
    };

    eframe::run_native(
        "WordArrange",
        options,
        Box::new(move |cc| {
            setup_custom_fonts(&cc.egui_ctx);
            Ok(Box::new(ui::app::WordArrangeApp::new(cc, config_manager)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI启动失败: {}", e))?;

    Ok(())
}
