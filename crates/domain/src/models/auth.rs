//! Authentication payload models for `POST /auth/login`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Administrative user as returned alongside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminUser {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Successful login payload: opaque bearer token plus the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_serialization() {
        let req = LoginRequest {
            username: "admin".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"username\":\"admin\""));
        assert!(json.contains("\"password\":\"secret\""));
    }

    #[test]
    fn test_login_response_deserialization() {
        let json = r#"{
            "token": "opaque-bearer-value",
            "user": {"username": "admin", "role": "owner"}
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "opaque-bearer-value");
        assert_eq!(resp.user.username, "admin");
        assert_eq!(resp.user.role.as_deref(), Some("owner"));
        assert!(resp.user.id.is_none());
    }
}
