//! Authenticated user claims decoded from the identity cookie.
//!
//! The auth service issues an HS256 JWT which the sign-in flow stores in the
//! actix-identity cookie. Every handler that takes an [`AuthenticatedUser`]
//! parameter gets the decoded claims or a 401.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, web};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// JWT claims of the signed-in user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject: the auth-service user id.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Tenant every query is scoped to.
    pub academy_id: i32,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Decodes and validates a JWT issued by the auth service.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let decoded = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(decoded.claims)
    }
}

/// Returns true when `roles` contains `role`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => identity,
            Err(_) => return ready(Err(ErrorUnauthorized("no identity"))),
        };

        let token = match identity.id() {
            Ok(token) => token,
            Err(_) => return ready(Err(ErrorUnauthorized("no identity"))),
        };

        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(ErrorUnauthorized("server configuration missing")));
        };

        match Self::from_jwt(&token, &config.secret) {
            Ok(user) => ready(Ok(user)),
            Err(e) => {
                log::debug!("Failed to decode identity token: {e}");
                ready(Err(ErrorUnauthorized("invalid token")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn claims() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@academy.example".to_string(),
            name: "Admin".to_string(),
            academy_id: 42,
            roles: vec!["academy".to_string(), "academy_admin".to_string()],
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        }
    }

    #[test]
    fn test_jwt_round_trip() {
        let token = encode(
            &Header::default(),
            &claims(),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let user = AuthenticatedUser::from_jwt(&token, "secret").unwrap();
        assert_eq!(user.academy_id, 42);
        assert_eq!(user.email, "admin@academy.example");
    }

    #[test]
    fn test_jwt_rejects_wrong_secret() {
        let token = encode(
            &Header::default(),
            &claims(),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn test_check_role() {
        let roles = vec!["academy".to_string()];
        assert!(check_role("academy", &roles));
        assert!(!check_role("academy_admin", &roles));
    }
}
