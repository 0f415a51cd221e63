//! Emotion catalog and chart colours.

mod palette;

pub use palette::{color_for, FALLBACK_COLOR};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::EmotionId;

/// Read-only reference entry describing one selectable emotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emotion {
    pub id: EmotionId,
    pub name: String,
    #[serde(default)]
    pub color_primary: Option<String>,
    #[serde(default)]
    pub color_secondary: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl Emotion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EmotionId::new(),
            name: name.into(),
            color_primary: None,
            color_secondary: None,
            emoji: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

/// Sorts a catalog by name, the order every view presents it in.
pub fn sort_by_name(emotions: &mut [Emotion]) {
    emotions.sort_by(|a, b| a.name.cmp(&b.name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sorts_by_name() {
        let mut emotions = vec![Emotion::new("Sadness"), Emotion::new("Anger"), Emotion::new("Joy")];
        sort_by_name(&mut emotions);
        let names: Vec<_> = emotions.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Anger", "Joy", "Sadness"]);
    }

    #[test]
    fn emotion_row_tolerates_missing_colours() {
        let json = serde_json::json!({
            "id": "0f1e2d3c-2222-4b5a-8c7d-6e5f4a3b2c1d",
            "name": "Calm"
        });
        let emotion: Emotion = serde_json::from_value(json).unwrap();
        assert_eq!(emotion.name, "Calm");
        assert!(emotion.color_primary.is_none());
    }
}
