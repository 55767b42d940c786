//! 配置文件管理模块

use crate::core::models::AppConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// 配置管理器
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// 创建配置管理器
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// 获取默认配置路径
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "wordarrange", "WordArrange")
            .map(|d| d.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// 加载配置，文件不存在时返回默认值
    pub fn load(&self) -> Result<AppConfig> {
        if self.config_path.exists() {
            let content = std::fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&content)
                .with_context(|| format!("配置文件损坏: {}", self.config_path.display()))
        } else {
            Ok(AppConfig::default())
        }
    }

    /// 加载配置，出错时记录日志并回退到默认值
    pub fn load_or_default(&self) -> AppConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("加载配置失败，使用默认配置: {:#}", e);
                AppConfig::default()
            }
        }
    }

    /// 保存配置
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;
        tracing::debug!("配置已保存: {}", self.config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.json");

        let manager = ConfigManager::new(config_path);

        let mut config = AppConfig::default();
        config.touch_style.lift_px = 72.0;
        config.shuffle_seed = Some(5);
        config.auto_check = false;

        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("absent.json"));
        assert_eq!(manager.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ broken").unwrap();

        let manager = ConfigManager::new(path);
        assert!(manager.load().is_err());
        assert_eq!(manager.load_or_default(), AppConfig::default());

        manager.save(&AppConfig::default()).unwrap();
        assert_eq!(manager.load().unwrap(), AppConfig::default());
    }
}
