//! HTTP adapter for the Engine REST API.
//!
//! `reqwest` on desktop, `gloo-net` in the browser. Every request carries the
//! anonymous user id in the `X-User-Id` header.

use serde_json::Value;
use sheetkeeper_shared::USER_ID_HEADER;

use crate::ports::outbound::{ApiError, RawApiPort};

#[derive(Clone)]
pub struct ApiAdapter {
    base_url: String,
    user_id: String,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::Client,
}

impl ApiAdapter {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            #[cfg(not(target_arch = "wasm32"))]
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Maps a finished response to JSON, or to an error carrying the Engine's body.
fn into_json(status: u16, text: &str) -> Result<Value, ApiError> {
    if !(200..300).contains(&status) {
        tracing::debug!(status, "Engine returned an error");
        return Err(ApiError::from_status(status, text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::ParseError(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;

    pub(super) async fn send(
        adapter: &ApiAdapter,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut request = adapter
            .client
            .request(method, adapter.url(path))
            .header(USER_ID_HEADER, &adapter.user_id);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        into_json(status, &text)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        native::send(self, reqwest::Method::GET, path, None).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        native::send(self, reqwest::Method::POST, path, Some(body)).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        native::send(self, reqwest::Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        native::send(self, reqwest::Method::DELETE, path, None)
            .await
            .map(|_| ())
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use gloo_net::http::{Request, RequestBuilder};

    pub(super) async fn send(
        builder: RequestBuilder,
        user_id: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let builder = builder.header(USER_ID_HEADER, user_id);
        let request = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::SerializeError(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?,
        };
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        into_json(status, &text)
    }

    pub(super) fn get(url: &str) -> RequestBuilder {
        Request::get(url)
    }

    pub(super) fn post(url: &str) -> RequestBuilder {
        Request::post(url)
    }

    pub(super) fn put(url: &str) -> RequestBuilder {
        Request::put(url)
    }

    pub(super) fn delete(url: &str) -> RequestBuilder {
        Request::delete(url)
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait::async_trait(?Send)]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        web::send(web::get(&self.url(path)), &self.user_id, None).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        web::send(web::post(&self.url(path)), &self.user_id, Some(body)).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        web::send(web::put(&self.url(path)), &self.user_id, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        web::send(web::delete(&self.url(path)), &self.user_id, None)
            .await
            .map(|_| ())
    }
}
