use super::common::*;
use crate::assessment::domain::{QuestionnaireAnswers, ReadinessLevel};
use crate::assessment::scoring::{calculate_score, classify};
use crate::assessment::{assess, Submission};

const AI_LEVELS: [Option<&str>; 6] = [
    None,
    Some("mystery"),
    Some("none"),
    Some("basic"),
    Some("intermediate"),
    Some("advanced"),
];
const DATA_INFRASTRUCTURE: [Option<&str>; 5] = [
    None,
    Some("poor"),
    Some("basic"),
    Some("good"),
    Some("excellent"),
];
const TIMELINES: [Option<&str>; 5] = [
    None,
    Some("long"),
    Some("medium"),
    Some("short"),
    Some("immediate"),
];
const COMPANY_SIZES: [Option<&str>; 5] = [
    None,
    Some("startup"),
    Some("small"),
    Some("medium"),
    Some("enterprise"),
];

#[test]
fn worked_example_scores_advanced() {
    let breakdown = calculate_score(&submission().answers);

    assert_eq!(breakdown.ai_level, 20);
    assert_eq!(breakdown.data_infrastructure, 25);
    assert_eq!(breakdown.objectives, 10);
    assert_eq!(breakdown.timeline, 7);
    assert_eq!(breakdown.subtotal, 62);
    assert_eq!(breakdown.multiplier_tenths, 11);
    assert_eq!(breakdown.score, 68);
    assert_eq!(classify(breakdown.score), ReadinessLevel::Advanced);
}

#[test]
fn unrecognized_categories_score_zero() {
    let answers = QuestionnaireAnswers {
        ai_level: Some("unknown".to_string()),
        data_infrastructure: Some("??".to_string()),
        ..QuestionnaireAnswers::default()
    };

    let breakdown = calculate_score(&answers);
    assert_eq!(breakdown.score, 0);
    assert_eq!(breakdown.multiplier_tenths, 10);
    assert_eq!(classify(breakdown.score), ReadinessLevel::Foundation);
}

#[test]
fn category_lookups_are_case_sensitive() {
    let breakdown = calculate_score(&answers(Some("Advanced"), None, 0, None, None));
    assert_eq!(breakdown.ai_level, 0);
}

#[test]
fn multiplier_rounds_half_up() {
    // 5 * 1.1 = 5.5
    assert_eq!(calculate_score(&answers(None, None, 1, None, Some("small"))).score, 6);
    // 15 * 1.3 = 19.5
    assert_eq!(
        calculate_score(&answers(None, Some("basic"), 0, None, Some("enterprise"))).score,
        20
    );
    // 2 * 1.2 = 2.4
    assert_eq!(calculate_score(&answers(None, None, 0, Some("long"), Some("medium"))).score, 2);
}

#[test]
fn score_is_clamped_to_one_hundred() {
    let breakdown = calculate_score(&answers(
        Some("advanced"),
        Some("excellent"),
        0,
        Some("immediate"),
        Some("enterprise"),
    ));
    assert_eq!(breakdown.subtotal, 95);
    assert_eq!(breakdown.score, 100);

    let many_objectives = calculate_score(&answers(None, None, 10_000, None, None));
    assert_eq!(many_objectives.score, 100);
}

#[test]
fn every_category_combination_stays_in_range() {
    for ai_level in AI_LEVELS {
        for data in DATA_INFRASTRUCTURE {
            for timeline in TIMELINES {
                for size in COMPANY_SIZES {
                    for objectives in [0, 1, 3, 8] {
                        let score =
                            calculate_score(&answers(ai_level, data, objectives, timeline, size))
                                .score;
                        assert!(score <= 100, "score {score} out of range");
                    }
                }
            }
        }
    }
}

fn assert_non_decreasing(scores: &[u8], factor: &str) {
    for pair in scores.windows(2) {
        assert!(pair[0] <= pair[1], "{factor} lowered the score: {scores:?}");
    }
}

#[test]
fn score_is_monotonic_in_each_factor() {
    for data in DATA_INFRASTRUCTURE {
        for timeline in TIMELINES {
            for size in COMPANY_SIZES {
                let by_ai_level: Vec<u8> = AI_LEVELS[2..]
                    .iter()
                    .map(|level| calculate_score(&answers(*level, data, 2, timeline, size)).score)
                    .collect();
                assert_non_decreasing(&by_ai_level, "ai_level");

                let by_objectives: Vec<u8> = (0..12)
                    .map(|count| {
                        calculate_score(&answers(Some("basic"), data, count, timeline, size)).score
                    })
                    .collect();
                assert_non_decreasing(&by_objectives, "objectives");
            }
        }
    }

    for ai_level in AI_LEVELS {
        let by_data: Vec<u8> = DATA_INFRASTRUCTURE[1..]
            .iter()
            .map(|data| calculate_score(&answers(ai_level, *data, 1, Some("short"), None)).score)
            .collect();
        assert_non_decreasing(&by_data, "data_infrastructure");

        let by_timeline: Vec<u8> = TIMELINES[1..]
            .iter()
            .map(|timeline| {
                calculate_score(&answers(ai_level, Some("good"), 1, *timeline, None)).score
            })
            .collect();
        assert_non_decreasing(&by_timeline, "timeline");

        let by_size: Vec<u8> = COMPANY_SIZES[1..]
            .iter()
            .map(|size| {
                calculate_score(&answers(ai_level, Some("good"), 1, Some("short"), *size)).score
            })
            .collect();
        assert_non_decreasing(&by_size, "company_size");
    }
}

#[test]
fn classification_boundaries_belong_to_lower_tier() {
    let cases = [
        (0, ReadinessLevel::Foundation),
        (40, ReadinessLevel::Foundation),
        (41, ReadinessLevel::Developing),
        (65, ReadinessLevel::Developing),
        (66, ReadinessLevel::Advanced),
        (85, ReadinessLevel::Advanced),
        (86, ReadinessLevel::AiReady),
        (100, ReadinessLevel::AiReady),
    ];
    for (score, expected) in cases {
        assert_eq!(classify(score), expected, "score {score}");
    }
}

#[test]
fn tiers_are_ordered() {
    assert!(ReadinessLevel::Foundation < ReadinessLevel::Developing);
    assert!(ReadinessLevel::Developing < ReadinessLevel::Advanced);
    assert!(ReadinessLevel::Advanced < ReadinessLevel::AiReady);
}

#[test]
fn assess_is_deterministic() {
    let first = assess(submission()).expect("valid submission");
    let second = assess(submission()).expect("valid submission");
    assert_eq!(first, second);
    assert_eq!(first.breakdown.score, 68);
    assert_eq!(first.level, ReadinessLevel::Advanced);
}

#[test]
fn assess_rejects_before_scoring() {
    let submission = Submission {
        role: None,
        ..submission()
    };
    assert!(assess(submission).is_err());
}
