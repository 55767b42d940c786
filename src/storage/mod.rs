//! 本地存储

pub mod config;
