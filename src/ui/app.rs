//! 主应用程序
//!
//! 整合题库、课程和排序面板，提供完整的练习界面。

use crate::core::lesson::Lesson;
use crate::core::models::{AppConfig, ChallengeDeck};
use crate::core::verdict::Verdict;
use crate::storage::config::ConfigManager;
use crate::ui::arrange_board::{ArrangeBoard, BoardAction};
use crate::ui::dialogs::{ResultDialog, ResultDialogResult, SettingsDialog, SettingsResult};
use crate::ui::styles::{button_style, Theme};
use eframe::egui::{self, RichText};
use std::path::{Path, PathBuf};

/// 应用状态
#[derive(PartialEq)]
enum AppState {
    /// 选择题库
    Initial,
    /// 练习中
    Playing,
    /// 课程结束
    Finished,
}

/// 主应用程序
pub struct WordArrangeApp {
    /// 应用状态
    state: AppState,
    /// 配置
    config: AppConfig,
    /// 配置管理器
    config_manager: ConfigManager,
    /// 主题
    theme: Theme,
    /// 当前题库
    deck: ChallengeDeck,
    /// 题库来源路径，内置题库为空
    deck_path: Option<PathBuf>,
    /// 当前课程
    lesson: Option<Lesson>,
    /// 排序面板
    board: ArrangeBoard,
    /// 结果对话框
    result_dialog: ResultDialog,
    /// 设置对话框
    settings_dialog: SettingsDialog,
    /// 状态消息
    status_message: String,
}

impl WordArrangeApp {
    /// 创建新的应用实例
    pub fn new(cc: &eframe::CreationContext<'_>, config_manager: ConfigManager) -> Self {
        let mut visuals = egui::Visuals::light();
        button_style(&mut visuals);
        cc.egui_ctx.set_visuals(visuals);

        let config = config_manager.load_or_default();
        let mut settings_dialog = SettingsDialog::default();
        settings_dialog.load_from_config(&config);

        let mut app = Self {
            state: AppState::Initial,
            config,
            config_manager,
            theme: Theme::default(),
            deck: ChallengeDeck::builtin(),
            deck_path: None,
            lesson: None,
            board: ArrangeBoard::new(),
            result_dialog: ResultDialog::default(),
            settings_dialog,
            status_message: "请选择题库后开始练习".to_string(),
        };

        if let Some(path) = app.config.default_deck_path.clone() {
            app.open_deck(&path);
        }
        app
    }

    /// 打开题库文件
    fn open_deck(&mut self, path: &Path) {
        match ChallengeDeck::load(path) {
            Ok(deck) => {
                self.status_message = format!("已打开题库 \"{}\"，共 {} 题", deck.title, deck.len());
                self.deck = deck;
                self.deck_path = Some(path.to_path_buf());
            }
            Err(e) => {
                tracing::warn!("打开题库失败: {:#}", e);
                self.status_message = format!("打开题库失败: {}", e);
            }
        }
    }

    /// 选择题库文件
    fn pick_deck(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("题库", &["json"])
            .pick_file()
        {
            self.open_deck(&path);
        }
    }

    /// 开始课程
    fn start_lesson(&mut self) {
        match Lesson::new(self.deck.clone(), &self.config) {
            Ok(lesson) => {
                self.lesson = Some(lesson);
                self.board.reset();
                self.state = AppState::Playing;
                self.status_message = "把单词拖到正确的位置".to_string();
            }
            Err(e) => {
                self.status_message = format!("无法开始: {}", e);
            }
        }
    }

    /// 处理引擎判定
    fn handle_verdicts(&mut self) {
        let Some(ref mut lesson) = self.lesson else {
            return;
        };

        match lesson.poll_verdicts() {
            Some(Verdict::Correct) => {
                self.result_dialog.show_correct();
                self.status_message = "答对了！".to_string();
            }
            Some(Verdict::Incorrect) => {
                let answer = lesson.challenge().sentence.clone();
                self.result_dialog.show_incorrect(&answer);
                self.status_message = "再想想看".to_string();
            }
            None => {}
        }
    }

    /// 重做当前题
    fn retry_challenge(&mut self) {
        if let Some(ref mut lesson) = self.lesson {
            if let Err(e) = lesson.retry() {
                self.status_message = format!("重做失败: {}", e);
            }
            self.board.reset();
        }
    }

    /// 进入下一题
    fn next_challenge(&mut self) {
        let Some(ref mut lesson) = self.lesson else {
            return;
        };

        match lesson.advance() {
            Ok(true) => {
                let (current, total) = lesson.progress();
                self.status_message = format!("第 {}/{} 题", current, total);
            }
            Ok(false) => {
                self.state = AppState::Finished;
                self.status_message = "课程完成".to_string();
            }
            Err(e) => {
                self.status_message = format!("加载下一题失败: {}", e);
            }
        }
        self.board.reset();
    }

    /// 保存设置
    fn save_settings(&mut self) {
        self.settings_dialog.apply_to_config(&mut self.config);
        self.config.default_deck_path = self.deck_path.clone();

        match self.config_manager.save(&self.config) {
            Ok(()) => self.status_message = "设置已保存".to_string(),
            Err(e) => {
                tracing::warn!("保存设置失败: {:#}", e);
                self.status_message = format!("保存设置失败: {}", e);
            }
        }
    }
}

impl eframe::App for WordArrangeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 顶部菜单栏
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("文件", |ui| {
                    if ui.button("📂 打开题库...").clicked() {
                        self.pick_deck();
                        ui.close_menu();
                    }
                    if ui.button("📚 使用内置题库").clicked() {
                        self.deck = ChallengeDeck::builtin();
                        self.deck_path = None;
                        self.status_message = "已切换到内置题库".to_string();
                        ui.close_menu();
                    }
                    if ui.button("⚙ 设置").clicked() {
                        self.settings_dialog.load_from_config(&self.config);
                        self.settings_dialog.visible = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("❌ 退出").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // 底部状态栏
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(ref lesson) = self.lesson {
                        let stats = lesson.stats();
                        ui.label(format!(
                            "答对 {} · 答错 {}",
                            stats.correct_count(),
                            stats.incorrect_count()
                        ));
                    }
                });
            });
        });

        // 主内容区域
        egui::CentralPanel::default().show(ctx, |ui| match self.state {
            AppState::Initial => self.render_initial_view(ui),
            AppState::Playing => self.render_playing_view(ui),
            AppState::Finished => self.render_finished_view(ui),
        });

        self.handle_verdicts();
        self.render_dialogs(ctx);
    }
}

impl WordArrangeApp {
    /// 渲染初始视图
    fn render_initial_view(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.heading(RichText::new("🧩 Word Arrange").size(48.0));
            ui.label("把打乱的单词排成正确的句子");

            ui.add_space(30.0);

            ui.group(|ui| {
                ui.set_min_width(400.0);

                ui.horizontal(|ui| {
                    ui.label("题库:");
                    ui.label(RichText::new(&self.deck.title).strong());
                    ui.label(format!("（{} 题）", self.deck.len()));
                });

                let source = self
                    .deck_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "内置题库".to_string());
                ui.label(RichText::new(source).small().color(egui::Color32::GRAY));

                if ui.button("📂 选择题库文件").clicked() {
                    self.pick_deck();
                }
            });

            ui.add_space(20.0);

            let can_start = !self.deck.is_empty();
            if ui
                .add_enabled(can_start, egui::Button::new(RichText::new("🚀 开始练习").size(20.0)))
                .clicked()
            {
                self.start_lesson();
            }
        });
    }

    /// 渲染练习视图
    fn render_playing_view(&mut self, ui: &mut egui::Ui) {
        let show_translation = self.config.show_translation;
        let Some(ref mut lesson) = self.lesson else {
            return;
        };

        let (current, total) = lesson.progress();
        let title = lesson.title().to_string();
        let translation = lesson.challenge().translation.clone();

        ui.horizontal(|ui| {
            ui.heading(title);
            ui.separator();
            ui.label(format!("第 {}/{} 题", current, total));
        });
        ui.add(egui::ProgressBar::new(current as f32 / total as f32));
        ui.separator();

        ui.add_space(20.0);
        if show_translation {
            if let Some(text) = translation {
                ui.label(RichText::new(format!("💡 {}", text)).size(18.0));
                ui.add_space(12.0);
            }
        }

        let action = self.board.render(ui, lesson.engine_mut());

        ui.add_space(30.0);

        let submitted = lesson.engine().is_submitted();
        let solved = lesson.is_solved();
        let mut submit = action == BoardAction::Submit;
        let mut reshuffle = false;
        let mut next = false;

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!submitted && !solved, egui::Button::new("✓ 检查答案"))
                .clicked()
            {
                submit = true;
            }
            if ui
                .add_enabled(!submitted && !solved, egui::Button::new("🔀 重新打乱"))
                .clicked()
            {
                reshuffle = true;
            }
            if (submitted || solved) && !self.result_dialog.visible {
                if ui.button("➡ 下一题").clicked() {
                    next = true;
                }
            }
        });

        if submit && !submitted && !solved {
            lesson.engine_mut().submit();
        }
        if reshuffle {
            self.retry_challenge();
        }
        if next {
            self.next_challenge();
        }
    }

    /// 渲染完成视图
    fn render_finished_view(&mut self, ui: &mut egui::Ui) {
        let mut restart = false;

        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.heading(RichText::new("🏆 课程完成！").size(40.0));
            ui.add_space(20.0);

            if let Some(ref lesson) = self.lesson {
                let stats = lesson.stats();
                let accuracy = stats.accuracy();
                ui.label(format!("一次答对: {} 题", stats.first_try_correct()));
                ui.label(format!("总作答: {} 次", stats.attempts.len()));
                ui.label(
                    RichText::new(format!("正确率: {:.0}%", accuracy * 100.0))
                        .size(20.0)
                        .color(self.theme.accuracy_color(accuracy)),
                );
            }

            ui.add_space(30.0);
            if ui.button("🔁 再练一次").clicked() {
                restart = true;
            }
            if ui.button("🏠 返回首页").clicked() {
                self.state = AppState::Initial;
                self.lesson = None;
            }
        });

        if restart {
            self.start_lesson();
        }
    }

    /// 渲染对话框
    fn render_dialogs(&mut self, ctx: &egui::Context) {
        match self.result_dialog.render(ctx) {
            ResultDialogResult::Retry => self.retry_challenge(),
            ResultDialogResult::Next => self.next_challenge(),
            ResultDialogResult::None => {}
        }

        match self.settings_dialog.render(ctx) {
            SettingsResult::Save => self.save_settings(),
            SettingsResult::Cancel => {}
            SettingsResult::None => {}
        }
    }
}
