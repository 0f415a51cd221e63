//! Gamification - values returned by the streak/XP/badge procedures.
//!
//! The rules themselves live in the database; this module only shapes
//! what comes back and how hard we try to get it.

mod retry;

pub use retry::RetryPolicy;

use serde::{Deserialize, Serialize};

/// Newly awarded badge, passed through as the procedure returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Badge(pub serde_json::Value);

impl Badge {
    /// Badge name, when the row has one.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(|v| v.as_str())
    }
}

/// One row returned by `add_user_xp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    #[serde(default)]
    pub new_xp: Option<i64>,
    #[serde(default)]
    pub new_level: Option<i32>,
    #[serde(default)]
    pub level_up: Option<bool>,
}

/// Level-up flag taken from the first returned row; false when absent.
pub fn level_up(rows: &[XpAward]) -> bool {
    rows.first().and_then(|r| r.level_up).unwrap_or(false)
}

/// The best-effort steps that follow a recorded check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideEffect {
    Streak,
    Xp,
    Badges,
}

impl SideEffect {
    /// Name of the remote procedure backing this step.
    pub fn procedure(&self) -> &'static str {
        match self {
            SideEffect::Streak => "update_user_streak",
            SideEffect::Xp => "add_user_xp",
            SideEffect::Badges => "check_and_award_badges",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_up_reads_first_row_only() {
        let rows = vec![
            XpAward {
                level_up: Some(false),
                ..Default::default()
            },
            XpAward {
                level_up: Some(true),
                ..Default::default()
            },
        ];
        assert!(!level_up(&rows));
    }

    #[test]
    fn level_up_defaults_to_false() {
        assert!(!level_up(&[]));
        assert!(!level_up(&[XpAward::default()]));
    }

    #[test]
    fn xp_row_parses_partial_shape() {
        let rows: Vec<XpAward> =
            serde_json::from_value(serde_json::json!([{ "level_up": true }])).unwrap();
        assert!(level_up(&rows));
    }

    #[test]
    fn badge_passes_through_unknown_fields() {
        let badge = Badge(serde_json::json!({ "name": "First Step", "icon": "👣" }));
        assert_eq!(badge.name(), Some("First Step"));
        let json = serde_json::to_value(&badge).unwrap();
        assert_eq!(json["icon"], "👣");
    }

    #[test]
    fn side_effects_map_to_procedures() {
        assert_eq!(SideEffect::Streak.procedure(), "update_user_streak");
        assert_eq!(SideEffect::Xp.procedure(), "add_user_xp");
        assert_eq!(SideEffect::Badges.procedure(), "check_and_award_badges");
    }
}
