//! Extractores custom
//!
//! `AppJson` envuelve el extractor Json de axum para que un body
//! inválido o con campos faltantes salga como error de validación
//! (400) del taxonomy propio, en vez del 422 por defecto.

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::utils::errors::AppError;

#[derive(Debug)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header;

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        car_id: i64,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_fields_map_to_validation() {
        let err = AppJson::<Payload>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_validation() {
        let err = AppJson::<Payload>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let AppJson(payload) =
            AppJson::<Payload>::from_request(json_request(r#"{"car_id":5}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.car_id, 5);
    }
}
