//! Static emotion-name to chart-colour table.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Colour used for any emotion name missing from the table.
pub const FALLBACK_COLOR: &str = "#94a3b8";

static PALETTE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Joy", "#fbbf24"),
        ("Sadness", "#60a5fa"),
        ("Anger", "#f87171"),
        ("Fear", "#a78bfa"),
        ("Surprise", "#f472b6"),
        ("Disgust", "#34d399"),
        ("Calm", "#2dd4bf"),
        ("Anxiety", "#fb923c"),
        ("Love", "#fb7185"),
        ("Gratitude", "#4ade80"),
    ])
});

/// Chart colour for an emotion name. Lookup is exact-match.
pub fn color_for(name: &str) -> &'static str {
    PALETTE.get(name).copied().unwrap_or(FALLBACK_COLOR)
}
