//! JSON extractor with validation through the `validator` crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has been deserialized and then validated.
///
/// Malformed JSON, missing required fields, and failed validation rules all
/// reject with `400 {"error": "invalid request"}`.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     payload.email
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(email)]
        email: String,
        #[validate(range(exclusive_min = 0, exclusive_max = 150))]
        age: i32,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(p): ValidatedJson<Payload>| async move {
                format!("{}:{}", p.email, p.age)
            }),
        )
    }

    async fn post_json(body: &str) -> StatusCode {
        app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        assert_eq!(post_json(r#"{"email":"a@x.com","age":30}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejections_are_bad_request() {
        for body in [
            "not json",
            r#"{"email":"a@x.com"}"#,
            r#"{"email":"nope","age":30}"#,
            r#"{"email":"a@x.com","age":0}"#,
            r#"{"email":"a@x.com","age":150}"#,
        ] {
            assert_eq!(post_json(body).await, StatusCode::BAD_REQUEST, "{body}");
        }
    }
}
