//! Check-in records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CheckInId, EmotionId, Timestamp, UserId};

/// A check-in about to be recorded.
///
/// Intensity is stored as given; the scale is owned by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckIn {
    pub user_id: UserId,
    pub emotion_id: EmotionId,
    pub intensity: i32,
    pub triggers: Vec<String>,
}

/// A stored check-in row. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: CheckInId,
    pub user_id: UserId,
    pub emotion_id: EmotionId,
    pub intensity: i32,
    #[serde(default)]
    pub triggers: Vec<String>,
    pub created_at: Timestamp,
}

impl CheckIn {
    /// Materializes a new check-in with a fresh id and the current time.
    pub fn record(new: NewCheckIn) -> Self {
        Self {
            id: CheckInId::new(),
            user_id: new.user_id,
            emotion_id: new.emotion_id,
            intensity: new.intensity,
            triggers: new.triggers,
            created_at: Timestamp::now(),
        }
    }
}

/// A check-in joined to the name of its emotion.
///
/// The name is absent when the emotion row is not visible to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSummary {
    pub id: CheckInId,
    pub emotion_id: EmotionId,
    pub emotion_name: Option<String>,
    pub intensity: i32,
    pub triggers: Vec<String>,
    pub created_at: Timestamp,
}

impl CheckInSummary {
    pub fn from_check_in(check_in: &CheckIn, emotion_name: Option<String>) -> Self {
        Self {
            id: check_in.id,
            emotion_id: check_in.emotion_id,
            emotion_name,
            intensity: check_in.intensity,
            triggers: check_in.triggers.clone(),
            created_at: check_in.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_input_verbatim() {
        let emotion_id = EmotionId::new();
        let check_in = CheckIn::record(NewCheckIn {
            user_id: UserId::new("user-1").unwrap(),
            emotion_id,
            intensity: 42,
            triggers: vec![],
        });

        assert_eq!(check_in.emotion_id, emotion_id);
        assert_eq!(check_in.intensity, 42);
        assert!(check_in.triggers.is_empty());
    }

    #[test]
    fn summary_copies_row_fields() {
        let check_in = CheckIn::record(NewCheckIn {
            user_id: UserId::new("user-1").unwrap(),
            emotion_id: EmotionId::new(),
            intensity: 7,
            triggers: vec!["work".to_string(), "sleep".to_string()],
        });

        let summary = CheckInSummary::from_check_in(&check_in, Some("Joy".to_string()));
        assert_eq!(summary.id, check_in.id);
        assert_eq!(summary.emotion_name.as_deref(), Some("Joy"));
        assert_eq!(summary.triggers, vec!["work", "sleep"]);
    }

    #[test]
    fn check_in_row_deserializes_without_triggers() {
        let json = serde_json::json!({
            "id": "7d9f3c1e-8d41-4f7e-9d3c-2b1a0e9f8c7d",
            "user_id": "5b0c2a7e-1111-4a2b-9c3d-0e1f2a3b4c5d",
            "emotion_id": "0f1e2d3c-2222-4b5a-8c7d-6e5f4a3b2c1d",
            "intensity": 5,
            "created_at": "2024-01-15T10:30:00+00:00"
        });

        let row: CheckIn = serde_json::from_value(json).unwrap();
        assert!(row.triggers.is_empty());
    }
}
