use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use keyseal_credentials::Verification;

/// Axum middleware admitting only holders of a credential issued by this
/// service.
///
/// On success the request carries an
/// [`AuthenticatedKey`](keyseal_credentials::AuthenticatedKey) extension.
/// Every failure is a bare 401 so clients cannot tell a forged token from an
/// unknown or revoked key.
pub async fn require_credential(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_token(req.headers());

    match state.verifier.verify(token.as_deref()).await {
        Verification::Authorized(key) => {
            req.extensions_mut().insert(key);
            Ok(next.run(req).await)
        }
        Verification::Rejected => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Read the identity token from `Authorization`, with or without a
/// `Bearer ` prefix.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_token(&headers("Bearer abc.def.ghi")).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bare_token() {
        assert_eq!(extract_token(&headers("abc.def.ghi")).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_missing_or_empty() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        assert_eq!(extract_token(&headers("")), None);
        assert_eq!(extract_token(&headers("Bearer ")), None);
    }
}
