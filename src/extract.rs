//! Request extractors that reject bad input with the app's JSON error body.

use axum::{
    extract::{FromRequestParts, Query, rejection::QueryRejection},
    http::request::Parts,
};

use crate::Error;

/// Like [Query], but a query string that cannot be deserialized, e.g. one that
/// repeats a key, is rejected with an [Error::InvalidQuery].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;

        Ok(Self(value))
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{Value, json};

    use crate::extract::ApiQuery;

    #[derive(Debug, Deserialize)]
    struct Params {
        name: Option<String>,
    }

    async fn echo(ApiQuery(params): ApiQuery<Params>) -> Json<Option<String>> {
        Json(params.name)
    }

    fn get_test_server() -> TestServer {
        let app = Router::new().route("/echo", get(echo));

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn passes_valid_query_through() {
        let server = get_test_server();

        let response = server.get("/echo").add_query_param("name", "widget").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!("widget"));
    }

    #[tokio::test]
    async fn repeated_key_is_json_bad_request() {
        let server = get_test_server();

        let response = server
            .get("/echo")
            .add_query_param("name", "a")
            .add_query_param("name", "b")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        let message = body["error"].as_str().expect("want error message");
        assert!(message.contains("duplicate field"), "got {message}");
    }
}
