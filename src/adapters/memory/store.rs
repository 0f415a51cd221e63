//! In-process store implementing every data port.
//!
//! Used by the `memory` gateway backend for local development and by tests.
//! There is no row-level policy: every session sees every row. The streak,
//! XP, and badge procedures are approximated with simple local rules.

use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::analytics::{EmotionCount, EmotionDistribution};
use crate::domain::checkin::{CheckIn, CheckInSummary, NewCheckIn};
use crate::domain::emotion::{sort_by_name, Emotion};
use crate::domain::foundation::{DomainError, EmotionId, OrganizationId, UserId};
use crate::domain::gamification::{Badge, SideEffect, XpAward};
use crate::domain::organization::{sort_by_email, OrganizationMember, Profile};
use crate::ports::{
    CheckInRepository, EmotionReader, EmotionStatsReader, GamificationProcedures,
    OrganizationMemberReader, OrganizationMemberWriter, ProfileReader,
};

const XP_PER_LEVEL: i64 = 100;

/// Badges the local rules can award: (name, minimum check-ins, minimum streak).
const BADGE_RULES: [(&str, u64, u32); 4] = [
    ("First Check-in", 1, 0),
    ("Streak Starter", 0, 3),
    ("Week Warrior", 0, 7),
    ("Dedicated", 10, 0),
];

#[derive(Debug, Default)]
struct UserProgress {
    xp: i64,
    level: i32,
    streak: u32,
    badges: Vec<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    emotions: Vec<Emotion>,
    profiles: Vec<Profile>,
    check_ins: Vec<CheckIn>,
    members: Vec<OrganizationMember>,
    progress: HashMap<UserId, UserProgress>,
    fail_inserts: bool,
    failing_procedures: HashMap<&'static str, u32>,
    lost_replies: HashMap<&'static str, u32>,
    procedure_calls: HashMap<&'static str, u32>,
}

impl StoreState {
    fn emotion_name(&self, id: &EmotionId) -> Option<String> {
        self.emotions
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.name.clone())
    }

    fn count_for(&self, user_id: &UserId) -> u64 {
        self.check_ins.iter().filter(|c| &c.user_id == user_id).count() as u64
    }

    /// Records a call and reports whether an injected failure consumes it.
    fn take_fault(&mut self, procedure: &'static str) -> bool {
        *self.procedure_calls.entry(procedure).or_insert(0) += 1;
        consume(&mut self.failing_procedures, procedure)
    }

    /// Hands back the result of an applied call, unless its reply is to be lost.
    fn reply<T>(&mut self, step: SideEffect, value: T) -> Result<T, DomainError> {
        if consume(&mut self.lost_replies, step.procedure()) {
            return Err(DomainError::procedure(step.procedure(), "reply lost after commit"));
        }
        Ok(value)
    }
}

fn consume(budget: &mut HashMap<&'static str, u32>, procedure: &'static str) -> bool {
    match budget.get_mut(procedure) {
        Some(remaining) if *remaining > 0 => {
            if *remaining != u32::MAX {
                *remaining -= 1;
            }
            true
        }
        _ => false,
    }
}

/// Thread-safe in-memory data store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the default emotion catalog.
    pub fn seeded() -> Self {
        let store = Self::new();
        for (name, emoji) in [
            ("Joy", "😊"),
            ("Sadness", "😢"),
            ("Anger", "😠"),
            ("Fear", "😨"),
            ("Surprise", "😮"),
            ("Disgust", "🤢"),
            ("Calm", "😌"),
            ("Anxiety", "😰"),
            ("Love", "🥰"),
            ("Gratitude", "🙏"),
        ] {
            store.add_emotion(Emotion::new(name).with_emoji(emoji));
        }
        store
    }

    // A panicking writer must not take the whole store down with it.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    // === Seeding ===

    pub fn add_emotion(&self, emotion: Emotion) -> EmotionId {
        let id = emotion.id;
        self.write().emotions.push(emotion);
        id
    }

    pub fn add_profile(&self, profile: Profile) {
        self.write().profiles.push(profile);
    }

    pub fn add_member(&self, org_id: OrganizationId, user_id: UserId) {
        let mut state = self.write();
        let row = OrganizationMember { org_id, user_id };
        if !state.members.contains(&row) {
            state.members.push(row);
        }
    }

    /// Looks up an emotion id by name.
    pub fn emotion_id(&self, name: &str) -> Option<EmotionId> {
        self.read()
            .emotions
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.id)
    }

    // === Failure Injection ===

    /// Makes every check-in insert fail while set.
    pub fn fail_inserts(&self, fail: bool) {
        self.write().fail_inserts = fail;
    }

    /// Makes the next `times` calls to a procedure fail. `u32::MAX` fails forever.
    pub fn fail_procedure(&self, step: SideEffect, times: u32) {
        self.write()
            .failing_procedures
            .insert(step.procedure(), times);
    }

    /// Applies the next `times` calls to a procedure, then reports them as failed.
    pub fn drop_procedure_replies(&self, step: SideEffect, times: u32) {
        self.write()
            .lost_replies
            .insert(step.procedure(), times);
    }

    // === Inspection ===

    pub fn procedure_calls(&self, step: SideEffect) -> u32 {
        self.read()
            .procedure_calls
            .get(step.procedure())
            .copied()
            .unwrap_or(0)
    }

    pub fn check_ins_for(&self, user_id: &UserId) -> Vec<CheckIn> {
        self.read()
            .check_ins
            .iter()
            .filter(|c| &c.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn members_of(&self, org_id: &OrganizationId) -> Vec<UserId> {
        self.read()
            .members
            .iter()
            .filter(|m| &m.org_id == org_id)
            .map(|m| m.user_id.clone())
            .collect()
    }

    pub fn xp_of(&self, user_id: &UserId) -> i64 {
        self.read().progress.get(user_id).map(|p| p.xp).unwrap_or(0)
    }

    pub fn streak_of(&self, user_id: &UserId) -> u32 {
        self.read().progress.get(user_id).map(|p| p.streak).unwrap_or(0)
    }
}

/// Consecutive days ending at the most recent check-in day.
fn streak_length(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut iter = days.iter().rev();
    let Some(mut current) = iter.next().copied() else {
        return 0;
    };
    let mut streak = 1;
    for day in iter {
        if current.pred_opt() == Some(*day) {
            streak += 1;
            current = *day;
        } else {
            break;
        }
    }
    streak
}

fn procedure_failure(step: SideEffect) -> DomainError {
    DomainError::procedure_unavailable(step.procedure(), "injected failure")
}

#[async_trait]
impl CheckInRepository for InMemoryStore {
    async fn insert(&self, check_in: &NewCheckIn) -> Result<CheckIn, DomainError> {
        let mut state = self.write();
        if state.fail_inserts {
            return Err(DomainError::database("insert into check_ins failed"));
        }
        let row = CheckIn::record(check_in.clone());
        state.check_ins.push(row.clone());
        Ok(row)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<CheckInSummary>, DomainError> {
        let state = self.read();
        let mut rows: Vec<&CheckIn> = state
            .check_ins
            .iter()
            .rev()
            .filter(|c| &c.user_id == user_id)
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(rows
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|c| CheckInSummary::from_check_in(c, state.emotion_name(&c.emotion_id)))
            .collect())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        Ok(self.read().check_ins.len() as u64)
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        Ok(self.read().count_for(user_id))
    }
}

#[async_trait]
impl EmotionReader for InMemoryStore {
    async fn list_emotions(&self) -> Result<Vec<Emotion>, DomainError> {
        let mut emotions = self.read().emotions.clone();
        sort_by_name(&mut emotions);
        Ok(emotions)
    }
}

#[async_trait]
impl EmotionStatsReader for InMemoryStore {
    async fn global_emotion_stats(&self) -> Result<Vec<EmotionCount>, DomainError> {
        let state = self.read();
        let names: Vec<Option<String>> = state
            .check_ins
            .iter()
            .map(|c| state.emotion_name(&c.emotion_id))
            .collect();
        let distribution = EmotionDistribution::tally(names.iter().map(|n| n.as_deref()));
        Ok(distribution.counts().to_vec())
    }
}

#[async_trait]
impl ProfileReader for InMemoryStore {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let mut profiles = self.read().profiles.clone();
        sort_by_email(&mut profiles);
        Ok(profiles)
    }

    async fn count_profiles(&self) -> Result<u64, DomainError> {
        Ok(self.read().profiles.len() as u64)
    }

    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self
            .read()
            .profiles
            .iter()
            .find(|p| &p.id == user_id)
            .cloned())
    }
}

#[async_trait]
impl OrganizationMemberReader for InMemoryStore {
    async fn member_ids(&self, org_id: &OrganizationId) -> Result<Vec<UserId>, DomainError> {
        Ok(self.members_of(org_id))
    }
}

#[async_trait]
impl OrganizationMemberWriter for InMemoryStore {
    async fn add_members(
        &self,
        org_id: &OrganizationId,
        user_ids: &[UserId],
    ) -> Result<usize, DomainError> {
        let mut state = self.write();
        let mut added = 0;
        for user_id in user_ids {
            let row = OrganizationMember {
                org_id: *org_id,
                user_id: user_id.clone(),
            };
            if !state.members.contains(&row) {
                state.members.push(row);
                added += 1;
            }
        }
        Ok(added)
    }
}

#[async_trait]
impl GamificationProcedures for InMemoryStore {
    async fn update_streak(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut state = self.write();
        if state.take_fault(SideEffect::Streak.procedure()) {
            return Err(procedure_failure(SideEffect::Streak));
        }
        let days: BTreeSet<NaiveDate> = state
            .check_ins
            .iter()
            .filter(|c| &c.user_id == user_id)
            .map(|c| c.created_at.date())
            .collect();
        let streak = streak_length(&days);
        state.progress.entry(user_id.clone()).or_default().streak = streak;
        state.reply(SideEffect::Streak, ())
    }

    async fn add_xp(&self, user_id: &UserId, amount: u32) -> Result<Vec<XpAward>, DomainError> {
        let mut state = self.write();
        if state.take_fault(SideEffect::Xp.procedure()) {
            return Err(procedure_failure(SideEffect::Xp));
        }
        let progress = state.progress.entry(user_id.clone()).or_default();
        let previous_level = progress.level.max(1);
        progress.xp += i64::from(amount);
        progress.level = (progress.xp / XP_PER_LEVEL) as i32 + 1;
        let award = XpAward {
            new_xp: Some(progress.xp),
            new_level: Some(progress.level),
            level_up: Some(progress.level > previous_level),
        };
        state.reply(SideEffect::Xp, vec![award])
    }

    async fn award_badges(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError> {
        let mut state = self.write();
        if state.take_fault(SideEffect::Badges.procedure()) {
            return Err(procedure_failure(SideEffect::Badges));
        }
        let total = state.count_for(user_id);
        let progress = state.progress.entry(user_id.clone()).or_default();

        let mut awarded = Vec::new();
        for (name, min_check_ins, min_streak) in BADGE_RULES {
            let earned = total >= min_check_ins && progress.streak >= min_streak;
            if earned && !progress.badges.iter().any(|b| b == name) {
                progress.badges.push(name.to_string());
                awarded.push(Badge(serde_json::json!({ "name": name })));
            }
        }
        state.reply(SideEffect::Badges, awarded)
    }
}
