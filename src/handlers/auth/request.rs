//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

/// User login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_fields() {
        let request = LoginRequest {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_err());

        let request = LoginRequest {
            username: "admin".to_string(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
