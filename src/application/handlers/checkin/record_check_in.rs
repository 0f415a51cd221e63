//! RecordCheckInHandler - Command handler for recording a check-in.
//!
//! The insert is the only step that decides the outcome. Streak, XP, and
//! badges follow as independent best-effort steps and are reported
//! individually; nothing is compensated when they fail. The cached personal
//! pages are invalidated last.
//!
//! Once the row is written the remaining steps run on their own task, so a
//! caller that goes away (client disconnect, request timeout) does not cut
//! them short. A step is only sent again when its failure shows the call had
//! no effect; a call that may have been applied is never repeated.

use std::future::Future;
use std::sync::Arc;

use crate::domain::checkin::{CheckInOutcome, NewCheckIn, SideEffectReport, StepStatus};
use crate::domain::foundation::{AuthenticatedUser, DomainError, EmotionId, UserId};
use crate::domain::gamification::{level_up, Badge, RetryPolicy, SideEffect};
use crate::ports::{DataGateway, GamificationProcedures, ViewCache, ViewPath};

/// Command to record a check-in for the authenticated user.
#[derive(Debug, Clone)]
pub struct RecordCheckInCommand {
    pub user: AuthenticatedUser,
    pub emotion_id: EmotionId,
    pub intensity: i32,
    pub triggers: Vec<String>,
}

/// Handler for recording check-ins.
pub struct RecordCheckInHandler {
    gateway: Arc<dyn DataGateway>,
    cache: Arc<dyn ViewCache>,
    retry: RetryPolicy,
    xp_per_check_in: u32,
}

impl RecordCheckInHandler {
    pub fn new(
        gateway: Arc<dyn DataGateway>,
        cache: Arc<dyn ViewCache>,
        retry: RetryPolicy,
        xp_per_check_in: u32,
    ) -> Self {
        Self {
            gateway,
            cache,
            retry,
            xp_per_check_in,
        }
    }

    /// Records the check-in. Never errors: failures fold into the outcome.
    pub async fn handle(&self, cmd: RecordCheckInCommand) -> CheckInOutcome {
        let stores = match self.gateway.session(&cmd.user) {
            Ok(stores) => stores,
            Err(e) => {
                tracing::error!(user_id = %cmd.user.id, error = %e, "could not open data session");
                return CheckInOutcome::save_failed();
            }
        };

        let new_check_in = NewCheckIn {
            user_id: cmd.user.id.clone(),
            emotion_id: cmd.emotion_id,
            intensity: cmd.intensity,
            triggers: cmd.triggers,
        };

        // 1. Primary write; nothing else runs if it fails
        let check_in = match stores.check_ins.insert(&new_check_in).await {
            Ok(row) => row,
            Err(e) => {
                tracing::error!(user_id = %cmd.user.id, error = %e, "check-in insert failed");
                return CheckInOutcome::save_failed();
            }
        };
        tracing::info!(check_in_id = %check_in.id, user_id = %check_in.user_id, "check-in recorded");

        // 2-5. Best-effort side effects and stale pages, detached from the caller
        let saga = SideEffectSaga {
            procedures: stores.gamification,
            cache: self.cache.clone(),
            retry: self.retry,
            xp_per_check_in: self.xp_per_check_in,
            user_id: check_in.user_id.clone(),
        };
        let result = match tokio::spawn(saga.run()).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(check_in_id = %check_in.id, error = %e, "side effect task died");
                SagaResult::abandoned()
            }
        };

        CheckInOutcome::Recorded {
            check_in_id: check_in.id,
            new_badges: result.new_badges,
            level_up: result.level_up,
            side_effects: result.side_effects,
        }
    }
}

struct SagaResult {
    new_badges: Vec<Badge>,
    level_up: bool,
    side_effects: SideEffectReport,
}

impl SagaResult {
    fn abandoned() -> Self {
        Self {
            new_badges: Vec::new(),
            level_up: false,
            side_effects: SideEffectReport {
                streak: StepStatus::Failed,
                xp: StepStatus::Failed,
                badges: StepStatus::Failed,
            },
        }
    }
}

/// Everything the post-insert steps need, owned so it can outlive the request.
struct SideEffectSaga {
    procedures: Arc<dyn GamificationProcedures>,
    cache: Arc<dyn ViewCache>,
    retry: RetryPolicy,
    xp_per_check_in: u32,
    user_id: UserId,
}

impl SideEffectSaga {
    async fn run(self) -> SagaResult {
        let user_id = &self.user_id;
        let procedures = &self.procedures;

        let streak = self
            .run_step(SideEffect::Streak, || procedures.update_streak(user_id))
            .await;
        let xp = self
            .run_step(SideEffect::Xp, || {
                procedures.add_xp(user_id, self.xp_per_check_in)
            })
            .await;
        let badges = self
            .run_step(SideEffect::Badges, || procedures.award_badges(user_id))
            .await;

        self.invalidate_views().await;

        SagaResult {
            level_up: xp.as_deref().map(level_up).unwrap_or(false),
            side_effects: SideEffectReport {
                streak: StepStatus::from_success(streak.is_some()),
                xp: StepStatus::from_success(xp.is_some()),
                badges: StepStatus::from_success(badges.is_some()),
            },
            new_badges: badges.unwrap_or_default(),
        }
    }

    /// Runs one side effect under the retry policy. `None` once it gives up.
    async fn run_step<T, F, Fut>(&self, step: SideEffect, mut call: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let max = self.retry.max_attempts;
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Some(value),
                Err(e) if attempt < max && e.is_retryable() => {
                    tracing::warn!(
                        procedure = step.procedure(),
                        attempt,
                        error = %e,
                        "side effect failed, retrying"
                    );
                    tokio::time::sleep(self.retry.delay_after(attempt)).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        procedure = step.procedure(),
                        attempts = attempt,
                        retryable = e.is_retryable(),
                        error = %e,
                        "side effect abandoned"
                    );
                    return None;
                }
            }
        }
    }

    async fn invalidate_views(&self) {
        for path in ViewPath::AFTER_CHECK_IN {
            if let Err(e) = self.cache.invalidate(path).await {
                tracing::warn!(path = %path, error = %e, "view invalidation failed");
            }
        }
    }
}
