//! API Port - typed HTTP boundary and its error type
//!
//! Services talk to the Engine REST API through `ApiPort`. The trait is generic
//! over request/response types; see `RawApiPort` for the object-safe half.

use serde::{de::DeserializeOwned, Serialize};
use sheetkeeper_shared::ErrorBody;

const NETWORK_MESSAGE: &str =
    "ネットワークエラーが発生しました。インターネット接続を確認してください。";
const UNAUTHORIZED_MESSAGE: &str = "認証に失敗しました。再度ログインしてください。";
const FORBIDDEN_MESSAGE: &str = "この操作を実行する権限がありません。";
const NOT_FOUND_MESSAGE: &str = "リソースが見つかりませんでした。";
const VALIDATION_FALLBACK: &str = "入力内容に誤りがあります。";
const SERVER_MESSAGE: &str =
    "サーバーエラーが発生しました。しばらく待ってから再度お試しください。";
const GENERIC_MESSAGE: &str = "エラーが発生しました。";
const UNEXPECTED_MESSAGE: &str = "予期しないエラーが発生しました。";

/// Failure of a call to the Engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The Engine answered with a non-success status.
    #[error("HTTP {status}")]
    HttpError {
        status: u16,
        body: Option<ErrorBody>,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Failed to serialize request: {0}")]
    SerializeError(String),
}

impl ApiError {
    /// Builds an HTTP error from a status and the raw response text.
    pub fn from_status(status: u16, body_text: &str) -> Self {
        ApiError::HttpError {
            status,
            body: serde_json::from_str(body_text).ok(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message shown to the user, with any detail lines on the following lines.
    pub fn user_message(&self) -> String {
        let (message, details) = self.message_parts();
        if details.is_empty() {
            message
        } else {
            format!("{}\n{}", message, details.join("\n"))
        }
    }

    fn message_parts(&self) -> (String, Vec<String>) {
        let (status, body) = match self {
            ApiError::RequestFailed(_) => return (NETWORK_MESSAGE.to_string(), Vec::new()),
            ApiError::ParseError(_) | ApiError::SerializeError(_) => {
                return (UNEXPECTED_MESSAGE.to_string(), Vec::new())
            }
            ApiError::HttpError { status, body } => (*status, body.as_ref()),
        };

        match status {
            401 => (UNAUTHORIZED_MESSAGE.to_string(), Vec::new()),
            403 => (FORBIDDEN_MESSAGE.to_string(), Vec::new()),
            404 => (NOT_FOUND_MESSAGE.to_string(), Vec::new()),
            s if s >= 500 => (SERVER_MESSAGE.to_string(), Vec::new()),
            422 => detail_parts(body, VALIDATION_FALLBACK),
            _ => detail_parts(body, GENERIC_MESSAGE),
        }
    }
}

fn detail_parts(body: Option<&ErrorBody>, fallback: &str) -> (String, Vec<String>) {
    let Some(body) = body else {
        return (fallback.to_string(), Vec::new());
    };
    if let Some(text) = body.detail_text() {
        return (text.to_string(), Vec::new());
    }
    let message = body
        .detail
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or(fallback)
        .to_string();
    let details = body
        .detail
        .get("details")
        .and_then(|d| d.as_array())
        .map(|lines| {
            lines
                .iter()
                .filter_map(|l| l.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    (message, details)
}

/// Typed REST access to the Engine.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait ApiPort: Clone + Send + Sync + 'static {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError>;

    async fn post<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>;

    async fn put<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_messages() {
        assert_eq!(
            ApiError::RequestFailed("connection refused".into()).user_message(),
            NETWORK_MESSAGE
        );
        assert_eq!(ApiError::from_status(401, "").user_message(), UNAUTHORIZED_MESSAGE);
        assert_eq!(
            ApiError::from_status(403, r#"{"detail":"Access denied"}"#).user_message(),
            "この操作を実行する権限がありません。"
        );
        assert_eq!(
            ApiError::from_status(404, r#"{"detail":"Character not found"}"#).user_message(),
            "リソースが見つかりませんでした。"
        );
        assert_eq!(ApiError::from_status(503, "oops").user_message(), SERVER_MESSAGE);
    }

    #[test]
    fn validation_detail_with_lines() {
        let body = json!({
            "detail": {
                "error": "skill_points_limit_exceeded",
                "message": "技能ポイントの上限を超えています",
                "details": ["職業Pの上限を超えています: 250/200 (EDU × 20)"]
            }
        });
        let err = ApiError::from_status(422, &body.to_string());
        assert_eq!(
            err.user_message(),
            "技能ポイントの上限を超えています\n職業Pの上限を超えています: 250/200 (EDU × 20)"
        );

        let err = ApiError::from_status(422, r#"{"detail":"名前は必須です"}"#);
        assert_eq!(err.user_message(), "名前は必須です");
    }

    #[test]
    fn other_client_errors_use_the_detail() {
        let err = ApiError::from_status(400, r#"{"detail":"無効なダイス式です: abc"}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message(), "無効なダイス式です: abc");
        assert_eq!(ApiError::from_status(400, "").user_message(), GENERIC_MESSAGE);
    }
}
