//! 课程进度
//!
//! 按顺序出题，持有当前挑战的排序引擎，收集判定并统计成绩。

use crate::core::arrangement::ArrangementEngine;
use crate::core::models::{AppConfig, Challenge, ChallengeDeck};
use crate::core::touch::TouchStyle;
use crate::core::verdict::{Verdict, VerdictLog, VerdictSource};
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 一次作答记录
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub challenge_id: String,
    pub verdict: Verdict,
    pub source: VerdictSource,
    /// 作答时的排列
    pub answer: String,
    pub at: DateTime<Utc>,
}

/// 课程成绩
#[derive(Debug, Clone, Default)]
pub struct LessonStats {
    pub attempts: Vec<AttemptRecord>,
}

impl LessonStats {
    pub fn correct_count(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.verdict == Verdict::Correct)
            .count()
    }

    pub fn incorrect_count(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.verdict == Verdict::Incorrect)
            .count()
    }

    /// 第一次作答就正确的题数
    pub fn first_try_correct(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        self.attempts
            .iter()
            .filter(|a| seen.insert(a.challenge_id.clone()))
            .filter(|a| a.verdict == Verdict::Correct)
            .count()
    }

    /// 正确率 (0.0 - 1.0)，没有作答时为0
    pub fn accuracy(&self) -> f32 {
        if self.attempts.is_empty() {
            return 0.0;
        }
        self.correct_count() as f32 / self.attempts.len() as f32
    }
}

/// 一节课
pub struct Lesson {
    deck: ChallengeDeck,
    /// 当前题目下标
    current: usize,
    engine: ArrangementEngine,
    log: VerdictLog,
    rng: StdRng,
    touch_style: TouchStyle,
    auto_check: bool,
    /// 当前题目是否已答对
    solved: bool,
    finished: bool,
    stats: LessonStats,
}

impl Lesson {
    /// 创建课程并挂载第一题
    pub fn new(mut deck: ChallengeDeck, config: &AppConfig) -> Result<Self> {
        deck.challenges.retain(Challenge::is_playable);
        if deck.is_empty() {
            bail!("题库 \"{}\" 没有可用的题目", deck.title);
        }

        let mut rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let log = VerdictLog::new();
        let mut engine = ArrangementEngine::new(
            &deck.challenges[0].sentence,
            &mut rng,
            Box::new(log.clone()),
        )?;
        engine.set_touch_style(config.touch_style);

        tracing::info!("开始课程 \"{}\"，共 {} 题", deck.title, deck.len());

        Ok(Self {
            deck,
            current: 0,
            engine,
            log,
            rng,
            touch_style: config.touch_style,
            auto_check: config.auto_check,
            solved: false,
            finished: false,
            stats: LessonStats::default(),
        })
    }

    /// 挂载第 `index` 题，引擎创建成功后才切换当前题目
    fn mount(&mut self, index: usize) -> Result<()> {
        let sentence = self.deck.challenges[index].sentence.clone();
        let mut engine =
            ArrangementEngine::new(&sentence, &mut self.rng, Box::new(self.log.clone()))?;
        engine.set_touch_style(self.touch_style);

        // 旧引擎遗留的事件作废
        self.log.drain();
        self.current = index;
        self.engine = engine;
        self.solved = false;
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.deck.title
    }

    pub fn challenge(&self) -> &Challenge {
        &self.deck.challenges[self.current]
    }

    pub fn engine(&self) -> &ArrangementEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ArrangementEngine {
        &mut self.engine
    }

    /// 当前题号（从1开始）与总题数
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.deck.len())
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn stats(&self) -> &LessonStats {
        &self.stats
    }

    /// 处理引擎产生的判定，返回本次计入成绩的判定
    pub fn poll_verdicts(&mut self) -> Option<Verdict> {
        let mut counted = None;

        for event in self.log.drain() {
            if self.solved {
                continue;
            }
            if event.source == VerdictSource::SoftCheck && !self.auto_check {
                continue;
            }

            let record = AttemptRecord {
                challenge_id: self.challenge().id.clone(),
                verdict: event.verdict,
                source: event.source,
                answer: self.engine.arrangement().join(" "),
                at: Utc::now(),
            };
            self.stats.attempts.push(record);
            if event.verdict == Verdict::Correct {
                self.solved = true;
            }
            counted = Some(event.verdict);
        }

        counted
    }

    /// 重做当前题目
    pub fn retry(&mut self) -> Result<()> {
        tracing::debug!("重做第 {} 题", self.current + 1);
        self.mount(self.current)
    }

    /// 进入下一题，没有下一题时返回 false
    pub fn advance(&mut self) -> Result<bool> {
        if self.current + 1 >= self.deck.len() {
            self.finished = true;
            tracing::info!(
                "课程结束: 答对 {} 次，答错 {} 次",
                self.stats.correct_count(),
                self.stats.incorrect_count()
            );
            return Ok(false);
        }

        self.mount(self.current + 1)?;
        Ok(true)
    }
}
