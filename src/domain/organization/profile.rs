use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// Public profile row for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Profile {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            display_name: None,
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Case-insensitive substring match on email or display name.
    ///
    /// A profile with neither field never matches, not even an empty term.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [&self.email, &self.display_name]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Orders profiles by email, with email-less profiles last.
pub fn sort_by_email(profiles: &mut [Profile]) {
    profiles.sort_by(|a, b| match (&a.email, &b.email) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> Profile {
        Profile::new(UserId::new(id).unwrap())
    }

    #[test]
    fn search_matches_email_case_insensitively() {
        let p = profile("u1").with_email("Alice@Example.com");
        assert!(p.matches_search("alice"));
        assert!(p.matches_search("EXAMPLE"));
        assert!(!p.matches_search("bob"));
    }

    #[test]
    fn search_matches_display_name() {
        let p = profile("u1").with_display_name("Bob Builder");
        assert!(p.matches_search("builder"));
    }

    #[test]
    fn empty_term_matches_any_profile_with_a_field() {
        assert!(profile("u1").with_email("a@b.c").matches_search(""));
    }

    #[test]
    fn profile_without_fields_never_matches() {
        assert!(!profile("u1").matches_search(""));
        assert!(!profile("u1").matches_search("u1"));
    }

    #[test]
    fn sort_puts_missing_emails_last() {
        let mut profiles = vec![
            profile("u1"),
            profile("u2").with_email("zed@x.io"),
            profile("u3").with_email("amy@x.io"),
        ];
        sort_by_email(&mut profiles);
        let ids: Vec<_> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["u3", "u2", "u1"]);
    }
}
