//! Request and response bodies for the check-in endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::checkin::{CheckInOutcome, SideEffectReport};
use crate::domain::foundation::{CheckInId, EmotionId};
use crate::domain::gamification::Badge;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCheckInRequest {
    pub emotion_id: EmotionId,
    pub intensity: i32,
    #[serde(default)]
    pub triggers: Vec<String>,
}

/// `{ success: true, checkInId, newBadges, levelUp, sideEffects }` or
/// `{ success: false, error }`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCheckInResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_id: Option<CheckInId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_badges: Option<Vec<Badge>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<SideEffectReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error text for a body that could not be read as a check-in.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid check-in request";

impl RecordCheckInResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::from(CheckInOutcome::Failed {
            error: error.into(),
        })
    }
}

impl From<CheckInOutcome> for RecordCheckInResponse {
    fn from(outcome: CheckInOutcome) -> Self {
        match outcome {
            CheckInOutcome::Recorded {
                check_in_id,
                new_badges,
                level_up,
                side_effects,
            } => Self {
                success: true,
                check_in_id: Some(check_in_id),
                new_badges: Some(new_badges),
                level_up: Some(level_up),
                side_effects: Some(side_effects),
                error: None,
            },
            CheckInOutcome::Failed { error } => Self {
                success: false,
                check_in_id: None,
                new_badges: None,
                level_up: None,
                side_effects: None,
                error: Some(error),
            },
        }
    }
}
