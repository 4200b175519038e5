//! Unit tests for identity claims.

#[cfg(test)]
mod tests {
    use crate::auth::Claims;
    use chrono::{Duration, Utc};

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new("user_2abc", expires_at);

        assert_eq!(claims.sub, "user_2abc");
        assert!(claims.email.is_none());
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_claims_builders() {
        let expires_at = Utc::now() + Duration::hours(1);

        let claims = Claims::new("user_2abc", expires_at)
            .with_email("ann@x.com")
            .with_issuer("https://idp.example.com");

        assert_eq!(claims.user_id(), "user_2abc");
        assert_eq!(claims.email.as_deref(), Some("ann@x.com"));
        assert_eq!(claims.iss.as_deref(), Some("https://idp.example.com"));
    }

    #[test]
    fn test_claims_deserialize_without_optional_fields() {
        let json = r#"{"sub":"user_9","iat":1700000000,"exp":1700003600}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();

        assert_eq!(claims.user_id(), "user_9");
        assert!(claims.email.is_none());
        assert!(claims.iss.is_none());
    }
}
