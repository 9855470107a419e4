use serde::{Deserialize, Serialize};

use crate::models::{Severity, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
}

/// Body of the create/update company calls.
///
/// Required fields are always present; optional ones are omitted rather than
/// sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub company_name: String,
    pub gst_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub roles: Vec<i64>,
    pub is_active: bool,
    /// Only sent when the password is being changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRoleAssignment {
    pub user_ids: Vec<i64>,
    pub role_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteRequest {
    pub vote: VoteKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateQuestionRequest {
    pub reason: String,
    pub severity: Severity,
    pub reviewed_by: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignPermissionsRequest {
    pub role_id: i64,
    pub permissions: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn company_payload_omits_empty_optionals() {
        let payload = CompanyPayload {
            company_name: "Acme".into(),
            website: None,
            industry: Some("Retail".into()),
            ..CompanyPayload::default()
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert!(value.get("website").is_none());
        assert!(value.get("company_description").is_none());
        assert_eq!(value["industry"], json!("Retail"));
    }

    #[test]
    fn invalidation_uses_camel_case() {
        let body = serde_json::to_value(InvalidateQuestionRequest {
            reason: "Ambiguous wording".into(),
            severity: Severity::Medium,
            reviewed_by: 3,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"reason": "Ambiguous wording", "severity": "medium", "reviewedBy": 3})
        );
    }

    #[test]
    fn password_is_optional_on_user_update() {
        let body = serde_json::to_value(UpdateUserRequest::default()).unwrap();
        assert!(body.get("password").is_none());
    }
}
