//! Core模块 - 排序挑战的全部业务逻辑，不依赖任何UI框架

pub mod models;
pub mod error;
pub mod touch;
pub mod verdict;
pub mod arrangement;
pub mod lesson;

#[cfg(test)]
mod sim_integration_tests;
