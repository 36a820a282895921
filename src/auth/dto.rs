use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub name: String,
}

/// Generic success body for write operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_remember_defaults_to_false() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"longenough"}"#).unwrap();
        assert!(!req.remember);

        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"longenough","remember":true}"#)
                .unwrap();
        assert!(req.remember);
    }

    #[test]
    fn user_response_serialization() {
        let response = UserResponse {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: "Test".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("id"));
    }
}
