//! JSON body extraction with problem-details errors.
//!
//! Replaces `web::Json` so malformed bodies come back as the same
//! problem-details shape as every other error, instead of actix's
//! default plain-text 400.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned> FromRequest for ValidatedJson<T> {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        Box::pin(async move {
            let mut body = web::BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk =
                    chunk.map_err(|_| AppError::bad_request("failed to read request body"))?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request("request body too large"));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body).map(ValidatedJson).map_err(|err| {
                debug!(error = %err, "rejected request body");
                AppError::bad_request(format!("invalid request body: {err}"))
            })
        })
    }
}
