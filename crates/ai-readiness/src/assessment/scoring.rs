//! Deterministic readiness scoring and tier classification.
//!
//! Category answers are looked up in fixed weight tables; anything the tables do not know
//! contributes the table's default instead of failing.

use serde::Serialize;

use super::domain::{QuestionnaireAnswers, ReadinessLevel};

pub const MAX_SCORE: u8 = 100;
pub const POINTS_PER_OBJECTIVE: u32 = 5;

/// Immutable category-to-weight mapping with an explicit fallback for unknown keys.
#[derive(Debug, Clone, Copy)]
pub struct WeightTable {
    entries: &'static [(&'static str, u32)],
    default: u32,
}

impl WeightTable {
    pub const fn new(entries: &'static [(&'static str, u32)], default: u32) -> Self {
        Self { entries, default }
    }

    pub fn weight(&self, key: Option<&str>) -> u32 {
        key.and_then(|key| {
            self.entries
                .iter()
                .find(|(category, _)| *category == key)
                .map(|(_, weight)| *weight)
        })
        .unwrap_or(self.default)
    }
}

pub const AI_LEVEL_POINTS: WeightTable = WeightTable::new(
    &[("none", 0), ("basic", 20), ("intermediate", 35), ("advanced", 50)],
    0,
);

pub const DATA_INFRASTRUCTURE_POINTS: WeightTable = WeightTable::new(
    &[("poor", 0), ("basic", 15), ("good", 25), ("excellent", 35)],
    0,
);

pub const TIMELINE_POINTS: WeightTable = WeightTable::new(
    &[("immediate", 10), ("short", 7), ("medium", 5), ("long", 2)],
    0,
);

/// Company size multipliers in tenths (11 == x1.1).
pub const COMPANY_SIZE_MULTIPLIER_TENTHS: WeightTable = WeightTable::new(
    &[("startup", 10), ("small", 11), ("medium", 12), ("enterprise", 13)],
    10,
);

/// Per-factor contributions behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub ai_level: u32,
    pub data_infrastructure: u32,
    pub objectives: u32,
    pub timeline: u32,
    pub subtotal: u32,
    pub multiplier_tenths: u32,
    pub score: u8,
}

/// Score a set of answers. Total over any input; the result is always within `0..=100`.
pub fn calculate_score(answers: &QuestionnaireAnswers) -> ScoreBreakdown {
    let ai_level = AI_LEVEL_POINTS.weight(answers.ai_level.as_deref());
    let data_infrastructure =
        DATA_INFRASTRUCTURE_POINTS.weight(answers.data_infrastructure.as_deref());
    let objective_count = u32::try_from(answers.objectives.len()).unwrap_or(u32::MAX);
    let objectives = objective_count.saturating_mul(POINTS_PER_OBJECTIVE);
    let timeline = TIMELINE_POINTS.weight(answers.timeline.as_deref());

    let subtotal = ai_level
        .saturating_add(data_infrastructure)
        .saturating_add(objectives)
        .saturating_add(timeline);

    let multiplier_tenths =
        COMPANY_SIZE_MULTIPLIER_TENTHS.weight(answers.company_size.as_deref());

    // Round half up in exact integer arithmetic, then clamp.
    let scaled = u64::from(subtotal) * u64::from(multiplier_tenths);
    let rounded = (scaled + 5) / 10;
    let score = rounded.min(u64::from(MAX_SCORE)) as u8;

    ScoreBreakdown {
        ai_level,
        data_infrastructure,
        objectives,
        timeline,
        subtotal,
        multiplier_tenths,
        score,
    }
}

/// Map a score to its tier. Upper bounds are inclusive: 40, 65 and 85 stay in the lower tier.
pub fn classify(score: u8) -> ReadinessLevel {
    match score {
        s if s <= 40 => ReadinessLevel::Foundation,
        s if s <= 65 => ReadinessLevel::Developing,
        s if s <= 85 => ReadinessLevel::Advanced,
        _ => ReadinessLevel::AiReady,
    }
}
