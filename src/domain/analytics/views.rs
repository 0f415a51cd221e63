//! Aggregate read models served to the client.

use serde::{Deserialize, Serialize};

use crate::domain::checkin::CheckInSummary;
use crate::domain::emotion::Emotion;
use crate::domain::foundation::Timestamp;
use crate::domain::organization::Profile;

use super::{ChartSlice, DistributionChart, EmotionDistribution};

/// Number of recent check-ins shown on the check-in page.
pub const RECENT_CHECK_IN_LIMIT: usize = 5;

/// Number of triggers ranked on the analytics page.
pub const TOP_TRIGGER_LIMIT: usize = 5;

/// Community-wide summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalWrap {
    pub total_users: u64,
    pub total_check_ins: u64,
    pub emotions: Vec<Emotion>,
    pub distribution: DistributionChart,
    pub top_emotion: Option<ChartSlice>,
}

impl GlobalWrap {
    pub fn new(
        total_users: u64,
        total_check_ins: u64,
        emotions: Vec<Emotion>,
        distribution: &EmotionDistribution,
    ) -> Self {
        Self {
            total_users,
            total_check_ins,
            emotions,
            distribution: distribution.render(),
            top_emotion: top_slice(distribution),
        }
    }
}

/// Emotion catalog plus the user's latest check-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInView {
    pub emotions: Vec<Emotion>,
    pub recent_check_ins: Vec<CheckInSummary>,
}

/// A trigger and how often it was reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCount {
    pub trigger: String,
    pub count: u64,
}

/// The user's own statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalAnalytics {
    pub total_check_ins: u64,
    pub distribution: DistributionChart,
    pub top_emotion: Option<ChartSlice>,
    pub average_intensity: Option<f64>,
    pub top_triggers: Vec<TriggerCount>,
}

impl PersonalAnalytics {
    pub fn from_check_ins(check_ins: &[CheckInSummary]) -> Self {
        let distribution =
            EmotionDistribution::tally(check_ins.iter().map(|c| c.emotion_name.as_deref()));

        let average_intensity = if check_ins.is_empty() {
            None
        } else {
            let sum: i64 = check_ins.iter().map(|c| i64::from(c.intensity)).sum();
            Some(sum as f64 / check_ins.len() as f64)
        };

        Self {
            total_check_ins: check_ins.len() as u64,
            distribution: distribution.render(),
            top_emotion: top_slice(&distribution),
            average_intensity,
            top_triggers: rank_triggers(check_ins, TOP_TRIGGER_LIMIT),
        }
    }
}

/// Profile page summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOverview {
    pub profile: Option<Profile>,
    pub total_check_ins: u64,
    pub last_check_in_at: Option<Timestamp>,
}

fn top_slice(distribution: &EmotionDistribution) -> Option<ChartSlice> {
    let top = distribution.top()?;
    distribution
        .slices()
        .into_iter()
        .find(|s| s.name == top.emotion_name)
}

/// Most frequent triggers, ties broken by first appearance.
pub fn rank_triggers(check_ins: &[CheckInSummary], limit: usize) -> Vec<TriggerCount> {
    let mut counts: Vec<TriggerCount> = Vec::new();
    for trigger in check_ins.iter().flat_map(|c| c.triggers.iter()) {
        match counts.iter_mut().find(|t| &t.trigger == trigger) {
            Some(existing) => existing.count += 1,
            None => counts.push(TriggerCount {
                trigger: trigger.clone(),
                count: 1,
            }),
        }
    }
    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
