//! Bearer-token authentication and per-unit authorization.
//!
//! Token issuance belongs to the identity provider; this server only
//! validates JWTs and reads the unit grants from their claims. With no
//! secret configured the middleware waves every request through with an
//! unrestricted principal.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::main_lib::AppState;

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
}

pub struct AuthManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: u16,
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
    /// Unit ids this principal may read; `["*"]` grants every unit.
    #[serde(default)]
    units: Vec<String>,
}

/// The authenticated caller, as seen by request handlers.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    /// `None` means unrestricted (auth disabled or a `*` grant).
    unit_ids: Option<HashSet<String>>,
}

impl AuthPrincipal {
    pub fn unrestricted() -> Self {
        Self { unit_ids: None }
    }

    pub fn with_units<I: IntoIterator<Item = String>>(units: I) -> Self {
        Self {
            unit_ids: Some(units.into_iter().collect()),
        }
    }

    /// Whether this principal may read the given unit.
    pub fn has_unit_access(&self, unit_id: &str) -> bool {
        match &self.unit_ids {
            None => true,
            Some(ids) => ids.contains(unit_id),
        }
    }
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        let decoding_key = DecodingKey::from_secret(&config.jwt_secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Validates a bearer token and derives the principal from its claims.
    pub fn validate_token(&self, token: &str) -> Result<AuthPrincipal, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::Unauthorized
                }
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })?;

        if claims.units.iter().any(|u| u == "*") {
            Ok(AuthPrincipal::unrestricted())
        } else {
            Ok(AuthPrincipal::with_units(claims.units))
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = Json(AuthErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(auth) = state.auth.clone() else {
        request.extensions_mut().insert(AuthPrincipal::unrestricted());
        return Ok(next.run(request).await);
    };

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::Unauthorized);
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::Unauthorized);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthorized);
    }

    let principal = auth.validate_token(token)?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn token_with_units(units: Vec<String>) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize;
        let claims = Claims {
            sub: "test".to_string(),
            iat: now,
            exp: now + 3600,
            units,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    fn manager() -> AuthManager {
        AuthManager::new(&AuthConfig {
            jwt_secret: SECRET.to_vec(),
        })
        .unwrap()
    }

    #[test]
    fn principal_carries_the_unit_grants() {
        let token = token_with_units(vec!["u1".to_string(), "u2".to_string()]);
        let principal = manager().validate_token(&token).unwrap();

        assert!(principal.has_unit_access("u1"));
        assert!(principal.has_unit_access("u2"));
        assert!(!principal.has_unit_access("u3"));
    }

    #[test]
    fn wildcard_grant_is_unrestricted() {
        let token = token_with_units(vec!["*".to_string()]);
        let principal = manager().validate_token(&token).unwrap();

        assert!(principal.has_unit_access("any-unit"));
    }

    #[test]
    fn garbage_tokens_are_unauthorized() {
        let err = manager().validate_token("not-a-jwt").unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[test]
    fn wrong_key_is_unauthorized() {
        let other = encode(
            &Header::default(),
            &Claims {
                sub: "test".to_string(),
                iat: 0,
                exp: usize::MAX,
                units: vec![],
            },
            &EncodingKey::from_secret(b"another-secret-another-secret!!!"),
        )
        .unwrap();
        let err = manager().validate_token(&other).unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[test]
    fn secret_key_rules() {
        assert!(decode_secret_key("").is_err());
        assert!(decode_secret_key("too-short").is_err());
        // 32 non-base64 ASCII bytes pass through verbatim.
        assert_eq!(
            decode_secret_key("secret!secret!secret!secret!full").unwrap(),
            b"secret!secret!secret!secret!full"
        );
        // Base64 input must decode to exactly 32 bytes.
        let encoded = BASE64.encode([7u8; 32]);
        assert_eq!(decode_secret_key(&encoded).unwrap(), vec![7u8; 32]);
    }
}
