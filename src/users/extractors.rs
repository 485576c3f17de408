use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Error shape shared by every user endpoint: a status and a JSON string.
pub type ApiError = (StatusCode, Json<String>);

pub const INVALID_USER_ID: &str = "Invalid user ID";

pub fn bad_request(msg: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(msg.into()))
}

/// The `:id` path segment as a user id.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                warn!(error = %e, "missing user id segment");
                bad_request(INVALID_USER_ID)
            })?;

        match parse_user_id(&raw) {
            Some(id) => Ok(UserId(id)),
            None => {
                warn!(raw = %raw, "invalid user id");
                Err(bad_request(INVALID_USER_ID))
            }
        }
    }
}

fn parse_user_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id >= 0)
}

/// `Json<T>` whose rejections use the `ApiError` shape (always 400).
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let text = rejection.body_text();
                warn!(error = %text, "rejected request body");
                Err(bad_request(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_user_id("1"), Some(1));
        assert_eq!(parse_user_id("0"), Some(0));
        assert_eq!(
            parse_user_id("9007199254740993"),
            Some(9_007_199_254_740_993)
        );
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["", "abc", "1.5", "-3", "1a", " 1", "99999999999999999999"] {
            assert_eq!(parse_user_id(raw), None, "{raw:?} should be rejected");
        }
    }
}
