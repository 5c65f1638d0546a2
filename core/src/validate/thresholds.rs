use serde::{Deserialize, Serialize};

/// Phase demand above this share of phase capacity is saturated.
pub const PHASE_SATURATION_RATIO: f64 = 0.8;
/// Estimated worker load above this multiple of MaxLoadPerPhase is overload.
pub const WORKER_OVERLOAD_RATIO: f64 = 1.2;
/// Share of clients at priority 9-10 above which priorities are imbalanced.
pub const HIGH_PRIORITY_SHARE: f64 = 0.3;
/// Co-run groups with more members than this are flagged.
pub const CORUN_GROUP_MAX: usize = 10;
/// Tasks scoring above this are treated as high complexity.
pub const COMPLEXITY_SCORE_THRESHOLD: f64 = 10.0;
/// Weight of each required skill in the complexity score.
pub const COMPLEXITY_SKILL_WEIGHT: f64 = 2.0;
/// Minimum QualificationLevel of a qualified worker.
pub const MIN_QUALIFICATION_FOR_COMPLEX: f64 = 4.0;
/// Fewer qualified workers than this (but at least one) is a redundancy risk.
pub const MIN_QUALIFIED_WORKERS: usize = 2;

pub const PRIORITY_RANGE: (f64, f64) = (1.0, 10.0);
pub const HIGH_PRIORITY_LEVELS: [f64; 2] = [9.0, 10.0];
pub const PHASE_RANGE: (f64, f64) = (1.0, 10.0);
pub const QUALIFICATION_RANGE: (f64, f64) = (1.0, 5.0);

/// Tunable business-risk tolerances. Defaults are the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationThresholds {
    pub phase_saturation_ratio: f64,
    pub worker_overload_ratio: f64,
    pub high_priority_share: f64,
    pub corun_group_max: usize,
    pub complexity_score_threshold: f64,
    pub complexity_skill_weight: f64,
    pub min_qualification_for_complex: f64,
    pub min_qualified_workers: usize,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            phase_saturation_ratio: PHASE_SATURATION_RATIO,
            worker_overload_ratio: WORKER_OVERLOAD_RATIO,
            high_priority_share: HIGH_PRIORITY_SHARE,
            corun_group_max: CORUN_GROUP_MAX,
            complexity_score_threshold: COMPLEXITY_SCORE_THRESHOLD,
            complexity_skill_weight: COMPLEXITY_SKILL_WEIGHT,
            min_qualification_for_complex: MIN_QUALIFICATION_FOR_COMPLEX,
            min_qualified_workers: MIN_QUALIFIED_WORKERS,
        }
    }
}

pub(crate) fn out_of_range(v: f64, (lo, hi): (f64, f64)) -> bool {
    v < lo || v > hi
}
