//! PostgREST implementations of the data ports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::analytics::EmotionCount;
use crate::domain::checkin::{CheckIn, CheckInSummary, NewCheckIn};
use crate::domain::emotion::Emotion;
use crate::domain::foundation::{
    CheckInId, DomainError, EmotionId, OrganizationId, Timestamp, UserId,
};
use crate::domain::gamification::{Badge, SideEffect, XpAward};
use crate::domain::organization::Profile;
use crate::ports::{
    CheckInRepository, EmotionReader, EmotionStatsReader, GamificationProcedures,
    OrganizationMemberReader, OrganizationMemberWriter, ProfileReader,
};

use super::client::PostgrestClient;
use super::error::GatewayError;

const CHECK_IN_COLUMNS: &str = "id,emotion_id,intensity,triggers,created_at,emotions(name)";
const RETURN_ROWS: &str = "return=representation";
const IGNORE_DUPLICATES: &str = "resolution=ignore-duplicates,return=representation";

/// Every data port over one PostgREST client.
///
/// The client's bearer decides the access scope.
#[derive(Clone)]
pub struct RestStore {
    client: PostgrestClient,
}

impl RestStore {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct CheckInInsert<'a> {
    user_id: &'a UserId,
    emotion_id: EmotionId,
    intensity: i32,
    triggers: &'a [String],
}

/// Row shape of the joined check-in select.
#[derive(Debug, Deserialize)]
struct CheckInRow {
    id: CheckInId,
    emotion_id: EmotionId,
    intensity: i32,
    #[serde(default)]
    triggers: Option<Vec<String>>,
    created_at: Timestamp,
    #[serde(default)]
    emotions: Option<EmotionName>,
}

#[derive(Debug, Deserialize)]
struct EmotionName {
    name: String,
}

impl From<CheckInRow> for CheckInSummary {
    fn from(row: CheckInRow) -> Self {
        CheckInSummary {
            id: row.id,
            emotion_id: row.emotion_id,
            emotion_name: row.emotions.map(|e| e.name),
            intensity: row.intensity,
            triggers: row.triggers.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MemberRow {
    org_id: OrganizationId,
    user_id: UserId,
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

fn procedure_error(step: SideEffect) -> impl Fn(GatewayError) -> DomainError {
    move |e| {
        if e.never_applied() {
            DomainError::procedure_unavailable(step.procedure(), e.to_string())
        } else {
            DomainError::procedure(step.procedure(), e.to_string())
        }
    }
}

#[async_trait]
impl CheckInRepository for RestStore {
    async fn insert(&self, check_in: &NewCheckIn) -> Result<CheckIn, DomainError> {
        let body = CheckInInsert {
            user_id: &check_in.user_id,
            emotion_id: check_in.emotion_id,
            intensity: check_in.intensity,
            triggers: &check_in.triggers,
        };
        let rows: Vec<CheckIn> = self
            .client
            .insert("check_ins", &[], RETURN_ROWS, &body)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::Missing("inserted check-in row").into())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<CheckInSummary>, DomainError> {
        let mut query = vec![
            ("select", CHECK_IN_COLUMNS.to_string()),
            ("user_id", eq(user_id)),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let rows: Vec<CheckInRow> = self.client.select("check_ins", &query).await?;
        Ok(rows.into_iter().map(CheckInSummary::from).collect())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        Ok(self
            .client
            .count("check_ins", &[("select", "id".to_string())])
            .await?)
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .client
            .count(
                "check_ins",
                &[("select", "id".to_string()), ("user_id", eq(user_id))],
            )
            .await?)
    }
}

#[async_trait]
impl EmotionReader for RestStore {
    async fn list_emotions(&self) -> Result<Vec<Emotion>, DomainError> {
        Ok(self
            .client
            .select(
                "emotions",
                &[
                    ("select", "id,name,color_primary,color_secondary,emoji".to_string()),
                    ("order", "name.asc".to_string()),
                ],
            )
            .await?)
    }
}

#[async_trait]
impl EmotionStatsReader for RestStore {
    async fn global_emotion_stats(&self) -> Result<Vec<EmotionCount>, DomainError> {
        self.client
            .rpc("get_global_emotion_stats", &json!({}))
            .await
            .map_err(|e| DomainError::procedure("get_global_emotion_stats", e.to_string()))
    }
}

#[async_trait]
impl ProfileReader for RestStore {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        Ok(self
            .client
            .select(
                "profiles",
                &[
                    ("select", "id,display_name,email".to_string()),
                    ("order", "email.asc.nullslast".to_string()),
                ],
            )
            .await?)
    }

    async fn count_profiles(&self) -> Result<u64, DomainError> {
        Ok(self
            .client
            .count("profiles", &[("select", "id".to_string())])
            .await?)
    }

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let rows: Vec<Profile> = self
            .client
            .select(
                "profiles",
                &[
                    ("select", "id,display_name,email".to_string()),
                    ("id", eq(user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl OrganizationMemberReader for RestStore {
    async fn member_ids(&self, org_id: &OrganizationId) -> Result<Vec<UserId>, DomainError> {
        let rows: Vec<MemberRow> = self
            .client
            .select(
                "organization_members",
                &[
                    ("select", "org_id,user_id".to_string()),
                    ("org_id", eq(org_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|r| r.user_id).collect())
    }
}

#[async_trait]
impl OrganizationMemberWriter for RestStore {
    async fn add_members(
        &self,
        org_id: &OrganizationId,
        user_ids: &[UserId],
    ) -> Result<usize, DomainError> {
        let body: Vec<MemberRow> = user_ids
            .iter()
            .map(|user_id| MemberRow {
                org_id: *org_id,
                user_id: user_id.clone(),
            })
            .collect();
        let inserted: Vec<MemberRow> = self
            .client
            .insert(
                "organization_members",
                &[("on_conflict", "org_id,user_id".to_string())],
                IGNORE_DUPLICATES,
                &body,
            )
            .await?;
        Ok(inserted.len())
    }
}

#[async_trait]
impl GamificationProcedures for RestStore {
    async fn update_streak(&self, user_id: &UserId) -> Result<(), DomainError> {
        let step = SideEffect::Streak;
        self.client
            .rpc_discard(step.procedure(), &json!({ "p_user_id": user_id }))
            .await
            .map_err(procedure_error(step))
    }

    async fn add_xp(&self, user_id: &UserId, amount: u32) -> Result<Vec<XpAward>, DomainError> {
        let step = SideEffect::Xp;
        self.client
            .rpc(
                step.procedure(),
                &json!({ "p_user_id": user_id, "p_xp_amount": amount }),
            )
            .await
            .map_err(procedure_error(step))
    }

    async fn award_badges(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError> {
        let step = SideEffect::Badges;
        let badges: Option<Vec<Badge>> = self
            .client
            .rpc(step.procedure(), &json!({ "p_user_id": user_id }))
            .await
            .map_err(procedure_error(step))?;
        Ok(badges.unwrap_or_default())
    }
}
