//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a recorded check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckInId(Uuid);

impl CheckInId {
    /// Creates a new random CheckInId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CheckInId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CheckInId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CheckInId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CheckInId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of an emotion in the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionId(Uuid);

impl EmotionId {
    /// Creates a new random EmotionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an EmotionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EmotionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmotionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(Uuid);

impl OrganizationId {
    /// Creates a new random OrganizationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an OrganizationId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrganizationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// User identifier (the auth provider's subject claim).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the identifier as a UUID, which is how the database stores it.
    pub fn to_uuid(&self) -> Result<Uuid, ValidationError> {
        Uuid::parse_str(&self.0)
            .map_err(|e| ValidationError::invalid_format("user_id", e.to_string()))
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_in_id_generates_unique_values() {
        assert_ne!(CheckInId::new(), CheckInId::new());
    }

    #[test]
    fn emotion_id_parses_from_string() {
        let uuid = Uuid::new_v4();
        let id: EmotionId = uuid.to_string().parse().unwrap();
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn organization_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<OrganizationId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&CheckInId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn user_id_rejects_empty_and_blank() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_to_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(UserId::from(uuid).to_uuid().unwrap(), uuid);
        assert!(UserId::new("user-123").unwrap().to_uuid().is_err());
    }
}
