//! Request and response bodies for organization endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::organization::SearchCandidatesResult;
use crate::domain::foundation::UserId;
use crate::domain::organization::Profile;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateSearchParams {
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<Profile> for CandidateResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name,
            email: profile.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl From<SearchCandidatesResult> for CandidateListResponse {
    fn from(result: SearchCandidatesResult) -> Self {
        Self {
            candidates: result.candidates.into_iter().map(Into::into).collect(),
            empty_message: result.empty_message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMembersRequest {
    pub user_ids: Vec<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_list_uses_camel_case() {
        let result = SearchCandidatesResult {
            candidates: vec![Profile::new(UserId::new("u-1").unwrap())
                .with_display_name("Noor")
                .with_email("noor@example.com")],
            empty_message: None,
        };

        let body = serde_json::to_value(CandidateListResponse::from(result)).unwrap();

        assert_eq!(body["candidates"][0]["displayName"], "Noor");
        assert!(body.get("emptyMessage").is_none());
    }

    #[test]
    fn add_members_request_reads_user_ids() {
        let req: AddMembersRequest =
            serde_json::from_value(json!({ "userIds": ["a", "b"] })).unwrap();
        assert_eq!(req.user_ids.len(), 2);
    }
}
