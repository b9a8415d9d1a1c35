use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::errors::ServiceError;

/// JSON body extractor; malformed or incomplete bodies become 400 errors
/// in the usual `ErrorResponse` shape.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!(reason = %rejection.body_text(), "Rejected request body");
                Err(ServiceError::ValidationError(rejection.body_text()))
            }
        }
    }
}

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Turns a missing record into a 404 carrying `message`.
pub fn found_or<T>(value: Option<T>, message: impl FnOnce() -> String) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::NotFound(message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_helpers_set_status() {
        assert_eq!(success_response("ok").status(), StatusCode::OK);
        assert_eq!(created_response("ok").status(), StatusCode::CREATED);
        assert_eq!(no_content_response().status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn missing_value_becomes_not_found() {
        let err = found_or::<u8>(None, || "Pet with ID 7 does not exist.".into()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.response_message(), "Pet with ID 7 does not exist.");
        assert_eq!(found_or(Some(3), String::new).unwrap(), 3);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Body {
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn api_json_accepts_well_formed_bodies() {
        let ApiJson(body) = ApiJson::<Body>::from_request(json_request(r#"{"name":"Rex"}"#), &())
            .await
            .unwrap();
        assert_eq!(body.name, "Rex");
    }

    #[tokio::test]
    async fn api_json_turns_bad_bodies_into_bad_request() {
        for raw in [r#"{}"#, r#"{"name":7}"#, "not json"] {
            let err = ApiJson::<Body>::from_request(json_request(raw), &())
                .await
                .err()
                .unwrap();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }
}
