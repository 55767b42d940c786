//! 核心数据模型定义

use crate::core::arrangement::tokenize;
use crate::core::touch::TouchStyle;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 单个排序挑战
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// 唯一标识，题库里缺省时自动生成
    #[serde(default = "new_id")]
    pub id: String,
    /// 英文原句
    pub sentence: String,
    /// 中文释义（可选）
    #[serde(default)]
    pub translation: Option<String>,
}

impl Challenge {
    pub fn new(sentence: &str, translation: Option<&str>) -> Self {
        Self {
            id: new_id(),
            sentence: sentence.to_string(),
            translation: translation.map(str::to_string),
        }
    }

    /// 句子中是否至少有一个单词
    pub fn is_playable(&self) -> bool {
        !tokenize(&self.sentence).is_empty()
    }
}

/// 题库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDeck {
    /// 题库名称
    pub title: String,
    /// 挑战列表
    pub challenges: Vec<Challenge>,
}

impl ChallengeDeck {
    /// 从JSON文本解析，丢弃没有单词的挑战
    pub fn from_json(json: &str) -> Result<Self> {
        let mut deck: ChallengeDeck = serde_json::from_str(json).context("题库格式错误")?;

        let before = deck.challenges.len();
        deck.challenges.retain(Challenge::is_playable);
        let skipped = before - deck.challenges.len();
        if skipped > 0 {
            tracing::warn!("题库 \"{}\" 中有 {} 个空句子已跳过", deck.title, skipped);
        }

        Ok(deck)
    }

    /// 从文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取题库: {}", path.display()))?;
        let deck = Self::from_json(&content)?;
        tracing::info!(
            "已加载题库 \"{}\"，共 {} 题",
            deck.title,
            deck.challenges.len()
        );
        Ok(deck)
    }

    /// 内置入门题库
    pub fn builtin() -> Self {
        let items = [
            ("I like apples", "我喜欢苹果"),
            ("The cat sat on the mat", "猫坐在垫子上"),
            ("My name is Tom", "我的名字是汤姆"),
            ("She has a red ball", "她有一个红色的球"),
            ("We go to school every day", "我们每天去上学"),
            ("The sun is very hot", "太阳很热"),
            ("Can you help me please", "你能帮帮我吗"),
            ("He is my best friend", "他是我最好的朋友"),
        ];

        Self {
            title: "入门句子".to_string(),
            challenges: items
                .iter()
                .map(|(s, t)| Challenge::new(s, Some(t)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 触摸拖拽样式
    #[serde(default)]
    pub touch_style: TouchStyle,
    /// 拖拽结束后排列正确时是否直接判为答对
    #[serde(default = "default_true")]
    pub auto_check: bool,
    /// 固定随机种子（调试用）
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
    /// 是否显示中文释义
    #[serde(default = "default_true")]
    pub show_translation: bool,
    /// 默认题库路径，为空则使用内置题库
    #[serde(default)]
    pub default_deck_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            touch_style: TouchStyle::default(),
            auto_check: true,
            shuffle_seed: None,
            show_translation: true,
            default_deck_path: None,
        }
    }
}
