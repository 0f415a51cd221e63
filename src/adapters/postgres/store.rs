//! PostgreSQL implementations of the data ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use uuid::Uuid;

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

use super::scope::{db_error, PgScope};

/// Every data port over one access scope.
#[derive(Clone)]
pub struct PgStore {
    scope: PgScope,
}

impl PgStore {
    pub(super) fn new(scope: PgScope) -> Self {
        Self { scope }
    }

    /// Runs a set-returning function and decodes its rows as JSON.
    ///
    /// `call` is the function invocation, e.g. `add_user_xp($1, $2)`.
    async fn procedure_rows<T: DeserializeOwned>(
        &self,
        step: &'static str,
        call: &str,
        user_id: Option<Uuid>,
        amount: Option<i32>,
    ) -> Result<Vec<T>, DomainError> {
        let sql = format!(
            "SELECT COALESCE(jsonb_agg(to_jsonb(t)), '[]'::jsonb) FROM {} t",
            call
        );
        let mut tx = self.scope.begin().await.map_err(not_applied(step))?;
        let mut query = sqlx::query_scalar::<_, serde_json::Value>(&sql);
        if let Some(user_id) = user_id {
            query = query.bind(user_id);
        }
        if let Some(amount) = amount {
            query = query.bind(amount);
        }
        let rows = query
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::procedure_unavailable(step, e.to_string()))?;
        tx.commit()
            .await
            .map_err(|e| DomainError::procedure(step, e.to_string()))?;

        serde_json::from_value(rows).map_err(|e| DomainError::procedure(step, e.to_string()))
    }
}

// A statement that fails inside the open transaction is rolled back with it;
// only a failed commit leaves the outcome unknown.
fn not_applied(step: &'static str) -> impl Fn(DomainError) -> DomainError {
    move |e| DomainError::procedure_unavailable(step, e.message)
}

fn user_uuid(user_id: &UserId) -> Result<Uuid, DomainError> {
    Ok(user_id.to_uuid()?)
}

#[derive(Debug, sqlx::FromRow)]
struct CheckInRow {
    id: Uuid,
    user_id: Uuid,
    emotion_id: Uuid,
    intensity: i32,
    triggers: Option<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl From<CheckInRow> for CheckIn {
    fn from(row: CheckInRow) -> Self {
        CheckIn {
            id: CheckInId::from_uuid(row.id),
            user_id: UserId::from(row.user_id),
            emotion_id: EmotionId::from_uuid(row.emotion_id),
            intensity: row.intensity,
            triggers: row.triggers.unwrap_or_default(),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    emotion_id: Uuid,
    emotion_name: Option<String>,
    intensity: i32,
    triggers: Option<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl From<SummaryRow> for CheckInSummary {
    fn from(row: SummaryRow) -> Self {
        CheckInSummary {
            id: CheckInId::from_uuid(row.id),
            emotion_id: EmotionId::from_uuid(row.emotion_id),
            emotion_name: row.emotion_name,
            intensity: row.intensity,
            triggers: row.triggers.unwrap_or_default(),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EmotionRow {
    id: Uuid,
    name: String,
    color_primary: Option<String>,
    color_secondary: Option<String>,
    emoji: Option<String>,
}

impl From<EmotionRow> for Emotion {
    fn from(row: EmotionRow) -> Self {
        Emotion {
            id: EmotionId::from_uuid(row.id),
            name: row.name,
            color_primary: row.color_primary,
            color_secondary: row.color_secondary,
            emoji: row.emoji,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    display_name: Option<String>,
    email: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: UserId::from(row.id),
            display_name: row.display_name,
            email: row.email,
        }
    }
}

#[async_trait]
impl CheckInRepository for PgStore {
    async fn insert(&self, check_in: &NewCheckIn) -> Result<CheckIn, DomainError> {
        let user_id = user_uuid(&check_in.user_id)?;

        let mut tx = self.scope.begin().await?;
        let row: CheckInRow = sqlx::query_as(
            r#"
            INSERT INTO check_ins (user_id, emotion_id, intensity, triggers)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, emotion_id, intensity, triggers, created_at
            "#,
        )
        .bind(user_id)
        .bind(check_in.emotion_id.as_uuid())
        .bind(check_in.intensity)
        .bind(&check_in.triggers)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("insert check-in"))?;
        tx.commit().await.map_err(db_error("commit check-in"))?;

        Ok(row.into())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<CheckInSummary>, DomainError> {
        let user_id = user_uuid(user_id)?;
        let limit = limit.map(|n| i64::try_from(n).unwrap_or(i64::MAX));

        // LIMIT NULL returns every row
        let mut tx = self.scope.begin().await?;
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.emotion_id, e.name AS emotion_name, c.intensity, c.triggers, c.created_at
            FROM check_ins c
            LEFT JOIN emotions e ON e.id = c.emotion_id
            WHERE c.user_id = $1
            ORDER BY c.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("list check-ins"))?;
        tx.commit().await.map_err(db_error("list check-ins"))?;

        Ok(rows.into_iter().map(CheckInSummary::from).collect())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        let mut tx = self.scope.begin().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM check_ins")
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("count check-ins"))?;
        tx.commit().await.map_err(db_error("count check-ins"))?;
        Ok(count.max(0) as u64)
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let user_id = user_uuid(user_id)?;
        let mut tx = self.scope.begin().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM check_ins WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("count check-ins"))?;
        tx.commit().await.map_err(db_error("count check-ins"))?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl EmotionReader for PgStore {
    async fn list_emotions(&self) -> Result<Vec<Emotion>, DomainError> {
        let mut tx = self.scope.begin().await?;
        let rows: Vec<EmotionRow> = sqlx::query_as(
            "SELECT id, name, color_primary, color_secondary, emoji FROM emotions ORDER BY name",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("list emotions"))?;
        tx.commit().await.map_err(db_error("list emotions"))?;
        Ok(rows.into_iter().map(Emotion::from).collect())
    }
}

#[async_trait]
impl EmotionStatsReader for PgStore {
    async fn global_emotion_stats(&self) -> Result<Vec<EmotionCount>, DomainError> {
        self.procedure_rows(
            "get_global_emotion_stats",
            "get_global_emotion_stats()",
            None,
            None,
        )
        .await
    }
}

#[async_trait]
impl ProfileReader for PgStore {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let mut tx = self.scope.begin().await?;
        let rows: Vec<ProfileRow> = sqlx::query_as(
            "SELECT id, display_name, email FROM profiles ORDER BY email ASC NULLS LAST",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("list profiles"))?;
        tx.commit().await.map_err(db_error("list profiles"))?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn count_profiles(&self) -> Result<u64, DomainError> {
        let mut tx = self.scope.begin().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("count profiles"))?;
        tx.commit().await.map_err(db_error("count profiles"))?;
        Ok(count.max(0) as u64)
    }

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let user_id = user_uuid(user_id)?;
        let mut tx = self.scope.begin().await?;
        let row: Option<ProfileRow> =
            sqlx::query_as("SELECT id, display_name, email FROM profiles WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("find profile"))?;
        tx.commit().await.map_err(db_error("find profile"))?;
        Ok(row.map(Profile::from))
    }
}

#[async_trait]
impl OrganizationMemberReader for PgStore {
    async fn member_ids(&self, org_id: &OrganizationId) -> Result<Vec<UserId>, DomainError> {
        let mut tx = self.scope.begin().await?;
        let ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM organization_members WHERE org_id = $1")
                .bind(org_id.as_uuid())
                .fetch_all(&mut *tx)
                .await
                .map_err(db_error("list organization members"))?;
        tx.commit()
            .await
            .map_err(db_error("list organization members"))?;
        Ok(ids.into_iter().map(UserId::from).collect())
    }
}

#[async_trait]
impl OrganizationMemberWriter for PgStore {
    async fn add_members(
        &self,
        org_id: &OrganizationId,
        user_ids: &[UserId],
    ) -> Result<usize, DomainError> {
        let ids = user_ids
            .iter()
            .map(user_uuid)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.scope.begin().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO organization_members (org_id, user_id)
            SELECT $1, unnest($2::uuid[])
            ON CONFLICT (org_id, user_id) DO NOTHING
            "#,
        )
        .bind(org_id.as_uuid())
        .bind(&ids)
        .execute(&mut *tx)
        .await
        .map_err(db_error("add organization members"))?;
        tx.commit()
            .await
            .map_err(db_error("add organization members"))?;

        Ok(result.rows_affected() as usize)
    }
}

#[async_trait]
impl GamificationProcedures for PgStore {
    async fn update_streak(&self, user_id: &UserId) -> Result<(), DomainError> {
        let step = SideEffect::Streak.procedure();
        let user_id = user_uuid(user_id)?;
        let mut tx = self.scope.begin().await.map_err(not_applied(step))?;
        sqlx::query("SELECT update_user_streak($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::procedure_unavailable(step, e.to_string()))?;
        tx.commit()
            .await
            .map_err(|e| DomainError::procedure(step, e.to_string()))
    }

    async fn add_xp(&self, user_id: &UserId, amount: u32) -> Result<Vec<XpAward>, DomainError> {
        let amount = i32::try_from(amount)
            .map_err(|_| DomainError::validation("p_xp_amount", "XP amount out of range"))?;
        self.procedure_rows(
            SideEffect::Xp.procedure(),
            "add_user_xp($1, $2)",
            Some(user_uuid(user_id)?),
            Some(amount),
        )
        .await
    }

    async fn award_badges(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError> {
        self.procedure_rows(
            SideEffect::Badges.procedure(),
            "check_and_award_badges($1)",
            Some(user_uuid(user_id)?),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn check_in_row_maps_to_domain() {
        let id = Uuid::new_v4();
        let user = Uuid::new_v4();
        let row = CheckInRow {
            id,
            user_id: user,
            emotion_id: Uuid::new_v4(),
            intensity: 2,
            triggers: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };

        let check_in = CheckIn::from(row);

        assert_eq!(check_in.id, CheckInId::from_uuid(id));
        assert_eq!(check_in.user_id, UserId::from(user));
        assert!(check_in.triggers.is_empty());
    }

    #[test]
    fn non_uuid_user_id_is_rejected_before_querying() {
        let err = user_uuid(&UserId::new("not-a-uuid").unwrap()).unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::ValidationFailed);
    }

    #[test]
    fn procedure_rows_decode_as_xp_awards() {
        let rows: Vec<XpAward> = serde_json::from_value(serde_json::json!([
            { "new_xp": 110, "new_level": 2, "level_up": true }
        ]))
        .unwrap();
        assert_eq!(rows[0].level_up, Some(true));
    }

    #[test]
    fn failure_to_open_the_transaction_is_retryable() {
        let err = not_applied("add_user_xp")(DomainError::database("pool timed out"));
        assert!(err.is_retryable());
        assert_eq!(err.message, "pool timed out");
    }
}
