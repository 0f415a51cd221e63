//! Emotion tallies and their chart rendering.

use serde::{Deserialize, Serialize};

use crate::domain::emotion::color_for;

/// Shown in place of a chart when nothing has been tallied.
pub const EMPTY_DISTRIBUTION_MESSAGE: &str = "No check-ins yet";

/// Number of occurrences of one emotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion_name: String,
    pub count: u64,
}

impl EmotionCount {
    pub fn new(emotion_name: impl Into<String>, count: u64) -> Self {
        Self {
            emotion_name: emotion_name.into(),
            count,
        }
    }
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

/// Either the chart or the empty-state message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DistributionChart {
    Empty { message: String },
    Chart { slices: Vec<ChartSlice> },
}

impl DistributionChart {
    pub fn is_empty(&self) -> bool {
        matches!(self, DistributionChart::Empty { .. })
    }
}

/// Counts per emotion name in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmotionDistribution {
    counts: Vec<EmotionCount>,
}

impl EmotionDistribution {
    /// Builds a distribution from pre-tallied rows.
    ///
    /// Rows repeating a name are merged into the first one.
    pub fn from_counts(rows: impl IntoIterator<Item = EmotionCount>) -> Self {
        let mut distribution = Self::default();
        for row in rows {
            distribution.add(&row.emotion_name, row.count);
        }
        distribution
    }

    /// Tallies one occurrence per name. `None` entries are skipped.
    pub fn tally<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let mut distribution = Self::default();
        for name in names.into_iter().flatten() {
            distribution.add(name, 1);
        }
        distribution
    }

    fn add(&mut self, name: &str, n: u64) {
        match self.counts.iter_mut().find(|c| c.emotion_name == name) {
            Some(existing) => existing.count += n,
            None => self.counts.push(EmotionCount::new(name, n)),
        }
    }

    pub fn counts(&self) -> &[EmotionCount] {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Highest count; on a tie the earliest entry wins.
    pub fn top(&self) -> Option<&EmotionCount> {
        self.counts.iter().fold(None, |best, c| match best {
            Some(b) if b.count >= c.count => Some(b),
            _ => Some(c),
        })
    }

    pub fn slices(&self) -> Vec<ChartSlice> {
        self.counts
            .iter()
            .map(|c| ChartSlice {
                name: c.emotion_name.clone(),
                value: c.count,
                color: color_for(&c.emotion_name).to_string(),
            })
            .collect()
    }

    pub fn render(&self) -> DistributionChart {
        if self.is_empty() {
            DistributionChart::Empty {
                message: EMPTY_DISTRIBUTION_MESSAGE.to_string(),
            }
        } else {
            DistributionChart::Chart {
                slices: self.slices(),
            }
        }
    }
}
