//! 界面模块

pub mod app;
pub mod arrange_board;
pub mod dialogs;
pub mod styles;
