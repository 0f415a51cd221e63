//! Per-call access scope for the direct Postgres gateway.
//!
//! Session scope runs each call in a transaction that carries the caller's
//! JWT claims and switches to the `authenticated` role, the same setup the
//! REST endpoint performs, so row-level policies see the same user.

use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::foundation::{AuthenticatedUser, DomainError};

/// Maps a sqlx error into a database `DomainError` for the named action.
pub(super) fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

#[derive(Clone)]
pub(super) struct PgScope {
    pool: PgPool,
    /// `None` runs as the pool's own role
    claims: Option<String>,
}

impl PgScope {
    pub fn session(pool: PgPool, user: &AuthenticatedUser) -> Self {
        Self {
            pool,
            claims: Some(session_claims(user)),
        }
    }

    pub fn privileged(pool: PgPool) -> Self {
        Self { pool, claims: None }
    }

    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        if let Some(claims) = &self.claims {
            sqlx::query("SELECT set_config('request.jwt.claims', $1, true)")
                .bind(claims)
                .execute(&mut *tx)
                .await
                .map_err(db_error("set session claims"))?;
            sqlx::query("SET LOCAL ROLE authenticated")
                .execute(&mut *tx)
                .await
                .map_err(db_error("switch role"))?;
        }

        Ok(tx)
    }
}

fn session_claims(user: &AuthenticatedUser) -> String {
    json!({
        "sub": user.id.as_str(),
        "role": user.role,
        "email": user.email,
    })
    .to_string()
}
