//! Session token decoding.
//!
//! The token is JWT shaped (`header.payload.signature`). Only the payload is
//! read; the signature is never checked because the remote API is the one
//! enforcing access. What comes out of here drives menu visibility and
//! nothing else.
use base64::Engine as _;
use serde::Deserialize;

use crate::EngineError;

/// Namespace marker the API puts in front of every role name.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Role and username carried by a readable session token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub role: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    roles: Option<RolesClaim>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RolesClaim {
    One(String),
    Many(Vec<String>),
}

impl RolesClaim {
    fn primary(self) -> Option<String> {
        match self {
            Self::One(role) => Some(role),
            Self::Many(roles) => roles.into_iter().next(),
        }
    }
}

/// Reads role and username from `token`, or `None` when there is no usable
/// session. Never fails loudly: an unreadable token is just a logged-out user.
pub fn decode(token: Option<&str>) -> Option<Session> {
    match try_decode(token) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::debug!("no session: {err}");
            None
        }
    }
}

/// Same as [`decode`], keeping the reason a token was rejected.
pub fn try_decode(token: Option<&str>) -> Result<Session, EngineError> {
    let token = token.map(str::trim).unwrap_or_default();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    if token.is_empty() {
        return Err(EngineError::MissingToken);
    }

    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
        _ => {
            return Err(EngineError::MalformedToken(
                "expected three segments".to_string(),
            ));
        }
    };

    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| EngineError::MalformedToken(err.to_string()))?;
    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|err| EngineError::MalformedToken(err.to_string()))?;

    let role = claims
        .roles
        .and_then(RolesClaim::primary)
        .map(|role| role.strip_prefix(ROLE_PREFIX).unwrap_or(&role).to_string())
        .filter(|role| !role.is_empty())
        .ok_or(EngineError::MissingClaim("roles"))?;
    let username = claims
        .sub
        .filter(|sub| !sub.is_empty())
        .ok_or(EngineError::MissingClaim("sub"))?;

    Ok(Session { role, username })
}

#[cfg(test)]
pub(crate) mod tests {
    use base64::Engine as _;

    use super::*;

    /// Builds an unsigned token around `payload`.
    pub(crate) fn token_with(payload: &str) -> String {
        let encode = |raw: &str| base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw);
        format!(
            "{}.{}.signature",
            encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            encode(payload)
        )
    }

    #[test]
    fn absent_token_is_no_session() {
        assert_eq!(decode(None), None);
        assert_eq!(try_decode(None), Err(EngineError::MissingToken));
        assert_eq!(try_decode(Some("   ")), Err(EngineError::MissingToken));
    }

    #[test]
    fn role_prefix_is_stripped() {
        let token = token_with(r#"{"sub":"maria","roles":"ROLE_NIVEL2","exp":1700000000}"#);

        let session = decode(Some(&token)).unwrap();

        assert_eq!(session.role, "NIVEL2");
        assert_eq!(session.username, "maria");
    }

    #[test]
    fn role_without_prefix_is_kept() {
        let token = token_with(r#"{"sub":"joao","roles":"NIVEL1"}"#);
        assert_eq!(decode(Some(&token)).unwrap().role, "NIVEL1");
    }

    #[test]
    fn only_the_leading_prefix_is_stripped() {
        let token = token_with(r#"{"sub":"joao","roles":"ROLE_ROLE_X"}"#);
        assert_eq!(decode(Some(&token)).unwrap().role, "ROLE_X");
    }

    #[test]
    fn roles_array_uses_first_entry() {
        let token = token_with(r#"{"sub":"ana","roles":["ROLE_NIVEL3","ROLE_NIVEL1"]}"#);
        assert_eq!(decode(Some(&token)).unwrap().role, "NIVEL3");
    }

    #[test]
    fn bearer_prefix_and_padding_are_tolerated() {
        let token = token_with(r#"{"sub":"ana","roles":"ROLE_NIVEL1"}"#);
        let mut segments: Vec<String> = token.split('.').map(str::to_string).collect();
        segments[1].push_str("==");
        let padded = format!("Bearer {}", segments.join("."));

        assert_eq!(decode(Some(&padded)).unwrap().username, "ana");
    }

    #[test]
    fn missing_claims_are_rejected() {
        let no_roles = token_with(r#"{"sub":"ana"}"#);
        assert_eq!(
            try_decode(Some(&no_roles)),
            Err(EngineError::MissingClaim("roles"))
        );

        let empty_role = token_with(r#"{"sub":"ana","roles":"ROLE_"}"#);
        assert_eq!(
            try_decode(Some(&empty_role)),
            Err(EngineError::MissingClaim("roles"))
        );

        let no_sub = token_with(r#"{"roles":"ROLE_NIVEL1"}"#);
        assert_eq!(
            try_decode(Some(&no_sub)),
            Err(EngineError::MissingClaim("sub"))
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            try_decode(Some("not-a-token")),
            Err(EngineError::MalformedToken(_))
        ));
        assert!(matches!(
            try_decode(Some("a.%%%.c")),
            Err(EngineError::MalformedToken(_))
        ));
        assert!(matches!(
            try_decode(Some("a.b.c.d")),
            Err(EngineError::MalformedToken(_))
        ));
        assert_eq!(decode(Some("a.bm90IGpzb24.c")), None);
    }
}
