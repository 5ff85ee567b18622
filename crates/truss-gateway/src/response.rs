//! Response encoding: a plain JSON body on success, or a 307-family
//! redirect when the response opts into the "redirector" capability.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use truss_core::RpcError;

/// Implemented by every generated response record (with a default no-op
/// body) so the gateway can ask "does this response want to redirect?"
/// without switching on a concrete type. A handwritten response type
/// that should redirect overrides [`Redirector::redirect_location`]
/// instead of the generator emitting a second response shape.
pub trait Redirector {
    fn redirect_location(&self) -> Option<String> {
        None
    }
}

/// Encode `value` as the success response: a redirect if it requests
/// one, otherwise a `status` JSON body.
pub fn json_response<T>(status: u16, value: &T) -> Result<Response, RpcError>
where
    T: Serialize + Redirector,
{
    if let Some(location) = value.redirect_location() {
        return Ok((
            StatusCode::TEMPORARY_REDIRECT,
            [(header::LOCATION, location)],
        )
            .into_response());
    }
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    Ok((code, Json(value)).into_response())
}

/// Encode a handler error as a structured `{message, status}` body at
/// its own status code.
pub fn error_response(err: &RpcError) -> Response {
    let code = StatusCode::from_u16(err.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(json!({ "message": err.message, "status": err.status }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct PlainResponse {
        value: i64,
    }
    impl Redirector for PlainResponse {}

    struct RedirectResponse {
        location: Option<String>,
    }
    impl Serialize for RedirectResponse {
        fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str("unused")
        }
    }
    impl Redirector for RedirectResponse {
        fn redirect_location(&self) -> Option<String> {
            self.location.clone()
        }
    }

    #[test]
    fn plain_response_uses_the_given_status() {
        let response = json_response(201, &PlainResponse { value: 7 }).unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn redirect_capable_response_issues_a_307() {
        let response = json_response(
            200,
            &RedirectResponse {
                location: Some("https://example.com/elsewhere".into()),
            },
        )
        .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com/elsewhere"
        );
    }

    #[test]
    fn error_response_carries_the_errors_own_status() {
        let response = error_response(&RpcError::not_found("no such thing"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
