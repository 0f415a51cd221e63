//! EmotionReader port - the emotion catalog.

use async_trait::async_trait;

use crate::domain::emotion::Emotion;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait EmotionReader: Send + Sync {
    /// All emotions, ordered by name.
    async fn list_emotions(&self) -> Result<Vec<Emotion>, DomainError>;
}
