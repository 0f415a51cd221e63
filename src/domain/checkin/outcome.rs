//! Outcome of recording a check-in.

use serde::Serialize;

use crate::domain::foundation::CheckInId;
use crate::domain::gamification::Badge;

/// Message returned whenever the primary insert does not succeed.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save check-in";

/// Final state of one best-effort side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Failed,
}

impl StepStatus {
    pub fn from_success(ok: bool) -> Self {
        if ok {
            StepStatus::Completed
        } else {
            StepStatus::Failed
        }
    }
}

/// Status of each side effect that follows the insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SideEffectReport {
    pub streak: StepStatus,
    pub xp: StepStatus,
    pub badges: StepStatus,
}

impl SideEffectReport {
    pub fn all_completed(&self) -> bool {
        [self.streak, self.xp, self.badges]
            .iter()
            .all(|s| *s == StepStatus::Completed)
    }
}

/// What the caller learns after submitting a check-in.
///
/// `Recorded` is returned whenever the row was written, regardless of
/// how the side effects went.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    Recorded {
        check_in_id: CheckInId,
        new_badges: Vec<Badge>,
        level_up: bool,
        side_effects: SideEffectReport,
    },
    Failed {
        error: String,
    },
}

impl CheckInOutcome {
    pub fn save_failed() -> Self {
        CheckInOutcome::Failed {
            error: SAVE_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckInOutcome::Recorded { .. })
    }

    pub fn check_in_id(&self) -> Option<CheckInId> {
        match self {
            CheckInOutcome::Recorded { check_in_id, .. } => Some(*check_in_id),
            CheckInOutcome::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_failed_uses_fixed_message() {
        match CheckInOutcome::save_failed() {
            CheckInOutcome::Failed { error } => assert_eq!(error, "Failed to save check-in"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn step_status_serializes_lowercase() {
        let report = SideEffectReport {
            streak: StepStatus::Completed,
            xp: StepStatus::Failed,
            badges: StepStatus::Completed,
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["streak"], "completed");
        assert_eq!(json["xp"], "failed");
        assert!(!report.all_completed());
    }
}
