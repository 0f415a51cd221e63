//! Check-in dialog state.
//!
//! The dialog is either closed or open with a draft. Opening fetches
//! nothing; the emotion catalog comes from the page that hosts the dialog.
//! A completed save closes the dialog and tells the host to refresh.

use std::future::Future;

use crate::domain::checkin::CheckInOutcome;
use crate::domain::foundation::EmotionId;

/// Intensity a fresh draft starts at.
pub const DEFAULT_INTENSITY: i32 = 5;

/// In-progress check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInDraft {
    pub emotion_id: Option<EmotionId>,
    pub intensity: i32,
    pub triggers: Vec<String>,
}

impl Default for CheckInDraft {
    fn default() -> Self {
        Self {
            emotion_id: None,
            intensity: DEFAULT_INTENSITY,
            triggers: Vec::new(),
        }
    }
}

/// What a submit attempt led to.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogSubmission {
    /// Nothing was sent: the dialog is closed, busy, or has no emotion.
    Blocked,
    /// Saved; the dialog closed and the host page should refresh.
    Completed(CheckInOutcome),
    /// Not saved; the dialog stays open with its draft.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct CheckInDialog {
    draft: Option<CheckInDraft>,
    submitting: bool,
    last_error: Option<String>,
}

impl CheckInDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn open(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(CheckInDraft::default());
            self.last_error = None;
        }
    }

    /// Closes the dialog, discarding any draft.
    pub fn close(&mut self) {
        self.draft = None;
        self.submitting = false;
        self.last_error = None;
    }

    pub fn draft(&self) -> Option<&CheckInDraft> {
        self.draft.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn select_emotion(&mut self, emotion_id: EmotionId) {
        if let Some(draft) = self.draft.as_mut() {
            draft.emotion_id = Some(emotion_id);
        }
    }

    pub fn set_intensity(&mut self, intensity: i32) {
        if let Some(draft) = self.draft.as_mut() {
            draft.intensity = intensity;
        }
    }

    /// Adds the trigger, or removes it if already present.
    pub fn toggle_trigger(&mut self, trigger: impl Into<String>) {
        let trigger = trigger.into();
        if let Some(draft) = self.draft.as_mut() {
            match draft.triggers.iter().position(|t| *t == trigger) {
                Some(i) => {
                    draft.triggers.remove(i);
                }
                None => draft.triggers.push(trigger),
            }
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
            && self
                .draft
                .as_ref()
                .is_some_and(|d| d.emotion_id.is_some())
    }

    /// Marks the dialog busy and hands out the draft to save.
    pub fn begin_submit(&mut self) -> Option<CheckInDraft> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        self.draft.clone()
    }

    pub fn finish_submit(&mut self, outcome: CheckInOutcome) -> DialogSubmission {
        self.submitting = false;
        match outcome {
            CheckInOutcome::Recorded { .. } => {
                self.close();
                DialogSubmission::Completed(outcome)
            }
            CheckInOutcome::Failed { error } => {
                tracing::error!(error = %error, "check-in dialog save failed");
                self.last_error = Some(error.clone());
                DialogSubmission::Failed(error)
            }
        }
    }

    /// Saves the draft through `save`, which is not called when blocked.
    pub async fn submit<F, Fut>(&mut self, save: F) -> DialogSubmission
    where
        F: FnOnce(CheckInDraft) -> Fut,
        Fut: Future<Output = CheckInOutcome>,
    {
        match self.begin_submit() {
            Some(draft) => {
                let outcome = save(draft).await;
                self.finish_submit(outcome)
            }
            None => DialogSubmission::Blocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkin::{SideEffectReport, StepStatus};
    use crate::domain::foundation::CheckInId;

    fn recorded() -> CheckInOutcome {
        CheckInOutcome::Recorded {
            check_in_id: CheckInId::new(),
            new_badges: vec![],
            level_up: false,
            side_effects: SideEffectReport {
                streak: StepStatus::Completed,
                xp: StepStatus::Completed,
                badges: StepStatus::Completed,
            },
        }
    }

    #[test]
    fn opening_starts_a_default_draft() {
        let mut dialog = CheckInDialog::new();
        assert!(!dialog.is_open());
        dialog.open();
        assert_eq!(dialog.draft(), Some(&CheckInDraft::default()));
        assert_eq!(dialog.draft().unwrap().intensity, 5);
    }

    #[test]
    fn closing_discards_the_draft() {
        let mut dialog = CheckInDialog::new();
        dialog.open();
        dialog.set_intensity(9);
        dialog.close();
        dialog.open();
        assert_eq!(dialog.draft().unwrap().intensity, DEFAULT_INTENSITY);
    }

    #[test]
    fn triggers_toggle() {
        let mut dialog = CheckInDialog::new();
        dialog.open();
        dialog.toggle_trigger("work");
        dialog.toggle_trigger("sleep");
        dialog.toggle_trigger("work");
        assert_eq!(dialog.draft().unwrap().triggers, vec!["sleep"]);
    }

    #[tokio::test]
    async fn submit_without_emotion_is_blocked() {
        let mut dialog = CheckInDialog::new();
        dialog.open();
        let mut called = false;

        let result = dialog
            .submit(|_| {
                called = true;
                async { recorded() }
            })
            .await;

        assert_eq!(result, DialogSubmission::Blocked);
        assert!(!called);
    }

    #[tokio::test]
    async fn completed_save_closes_dialog() {
        let mut dialog = CheckInDialog::new();
        dialog.open();
        let emotion = EmotionId::new();
        dialog.select_emotion(emotion);

        let result = dialog
            .submit(|draft| async move {
                assert_eq!(draft.emotion_id, Some(emotion));
                recorded()
            })
            .await;

        assert!(matches!(result, DialogSubmission::Completed(_)));
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn failed_save_keeps_draft_and_error() {
        let mut dialog = CheckInDialog::new();
        dialog.open();
        dialog.select_emotion(EmotionId::new());
        dialog.set_intensity(8);

        let result = dialog
            .submit(|_| async { CheckInOutcome::save_failed() })
            .await;

        assert_eq!(
            result,
            DialogSubmission::Failed("Failed to save check-in".to_string())
        );
        assert!(dialog.is_open());
        assert_eq!(dialog.draft().unwrap().intensity, 8);
        assert_eq!(dialog.last_error(), Some("Failed to save check-in"));
        assert!(dialog.can_submit());
    }

    #[test]
    fn busy_dialog_cannot_submit_twice() {
        let mut dialog = CheckInDialog::new();
        dialog.open();
        dialog.select_emotion(EmotionId::new());

        assert!(dialog.begin_submit().is_some());
        assert!(dialog.is_submitting());
        assert!(dialog.begin_submit().is_none());
    }
}
