use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::app::AppState;
use crate::auth::Claims;
use crate::errors::AppError;

/// Verified bearer token, extracted from the Authorization header.
///
/// Handlers pair this with `Claims::require` to form the full guard:
/// extraction rejects unauthenticated requests, `require` rejects
/// authenticated-but-unauthorized ones. Rejections flow through
/// `IntoResponse for AppError`, so guarded handlers never build 4xx
/// responses themselves.
#[derive(Debug, Clone)]
pub struct BearerClaims(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for BearerClaims {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(AppError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AppError::MalformedAuth)?;

        let token = parse_bearer(header)?;
        let claims = state.auth.verify(token)?;

        Ok(BearerClaims(claims))
    }
}

/// Accepts exactly `Bearer <token>`; scheme is case-insensitive per RFC 6750.
fn parse_bearer(header: &str) -> Result<&str, AppError> {
    let mut parts = header.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::MalformedAuth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_yields_token() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(parse_bearer("bearer abc").unwrap(), "abc");
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        assert!(matches!(parse_bearer("Token abc"), Err(AppError::MalformedAuth)));
        assert!(matches!(parse_bearer("Basic dXNlcg=="), Err(AppError::MalformedAuth)));
    }

    #[test]
    fn missing_or_extra_parts_are_malformed() {
        assert!(matches!(parse_bearer("Bearer"), Err(AppError::MalformedAuth)));
        assert!(matches!(parse_bearer("Bearer "), Err(AppError::MalformedAuth)));
        assert!(matches!(parse_bearer("Bearer a b"), Err(AppError::MalformedAuth)));
        assert!(matches!(parse_bearer(""), Err(AppError::MalformedAuth)));
    }
}
