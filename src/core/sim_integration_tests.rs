use crate::core::arrangement::tokenize;
use crate::core::lesson::Lesson;
use crate::core::models::{AppConfig, ChallengeDeck};
use crate::core::touch::{Point, Rect, RectResolver};
use crate::core::verdict::Verdict;

const CHIP_WIDTH: f32 = 60.0;
const CHIP_GAP: f32 = 10.0;

/// 模拟UI一帧的布局：单词块横排，背景铺在最下面
fn layout(len: usize) -> RectResolver {
    let mut resolver = RectResolver::new();
    resolver.push_other(Rect::new(Point::new(0.0, 0.0), Point::new(1000.0, 400.0)));
    for i in 0..len {
        let x = i as f32 * (CHIP_WIDTH + CHIP_GAP);
        resolver.push_item(
            i,
            Rect::new(Point::new(x, 100.0), Point::new(x + CHIP_WIDTH, 130.0)),
        );
    }
    resolver
}

fn chip_center(index: usize) -> Point {
    Point::new(index as f32 * (CHIP_WIDTH + CHIP_GAP) + CHIP_WIDTH / 2.0, 115.0)
}

fn deck_json() -> &'static str {
    r#"{
        "title": "Animals",
        "challenges": [
            { "sentence": "The dog can run fast" },
            { "sentence": "" },
            { "sentence": "Birds can fly high" }
        ]
    }"#
}

#[test]
fn sim_touch_lesson_solves_every_challenge() {
    let deck = ChallengeDeck::from_json(deck_json()).unwrap();
    assert_eq!(deck.len(), 2);

    let config = AppConfig {
        shuffle_seed: Some(2024),
        auto_check: false,
        ..Default::default()
    };
    let mut lesson = Lesson::new(deck, &config).unwrap();

    loop {
        let target = tokenize(&lesson.challenge().sentence);
        let resolver = layout(target.len());

        // 逐个位置用触摸把正确的单词拖过去
        for (i, word) in target.iter().enumerate() {
            let from = lesson.engine().arrangement()[i..]
                .iter()
                .position(|w| w == word)
                .unwrap()
                + i;
            let engine = lesson.engine_mut();
            engine.touch_start(from, chip_center(from)).unwrap();
            assert!(engine.drag_visual().is_some());
            // 经过空白区域，不应重排
            let before = engine.arrangement().to_vec();
            engine.touch_move(Point::new(900.0, 300.0), &resolver).unwrap();
            assert_eq!(engine.arrangement(), before.as_slice());

            engine.touch_move(chip_center(i), &resolver).unwrap();
            engine.touch_end();
        }

        assert_eq!(lesson.engine().arrangement(), target.as_slice());
        lesson.engine_mut().submit();
        assert_eq!(lesson.poll_verdicts(), Some(Verdict::Correct));

        if !lesson.advance().unwrap() {
            break;
        }
    }

    assert!(lesson.is_finished());
    assert_eq!(lesson.stats().correct_count(), 2);
    assert_eq!(lesson.stats().first_try_correct(), 2);
}

#[test]
fn sim_same_seed_same_shuffle() {
    let config = AppConfig {
        shuffle_seed: Some(99),
        ..Default::default()
    };
    let a = Lesson::new(ChallengeDeck::builtin(), &config).unwrap();
    let b = Lesson::new(ChallengeDeck::builtin(), &config).unwrap();
    assert_eq!(a.engine().arrangement(), b.engine().arrangement());
}
