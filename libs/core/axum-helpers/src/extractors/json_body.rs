use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `axum::Json` with an [`AppError`] rejection.
///
/// A malformed body, a wrong content type, or a type mismatch all answer
/// with `{ "success": false, ... }` instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn create(JsonBody(input): JsonBody<CreateStock>) -> impl IntoResponse { .. }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
