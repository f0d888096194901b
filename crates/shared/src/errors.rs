//! Error bodies returned by the Engine.

use serde::{Deserialize, Serialize};

/// Machine-readable code of a skill-point rejection.
pub const SKILL_POINTS_ERROR_CODE: &str = "skill_points_limit_exceeded";

/// Every error response is `{"detail": ...}`; `detail` is usually a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            detail: serde_json::Value::String(message.into()),
        }
    }

    /// The detail as text when it is a plain string.
    pub fn detail_text(&self) -> Option<&str> {
        self.detail.as_str()
    }

    /// The structured detail of a 422 skill-point rejection, if this is one.
    pub fn skill_points(&self) -> Option<SkillPointsErrorDetail> {
        serde_json::from_value(self.detail.clone()).ok()
    }
}

/// `detail` of a 422 skill-point rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPointsErrorDetail {
    pub error: String,
    pub message: String,
    pub details: Vec<String>,
}

impl SkillPointsErrorDetail {
    pub fn new(details: Vec<String>) -> Self {
        Self {
            error: SKILL_POINTS_ERROR_CODE.to_string(),
            message: "技能ポイントの上限を超えています".to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_detail() {
        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "Access denied"})).expect("error body");
        assert_eq!(body.detail_text(), Some("Access denied"));
        assert!(body.skill_points().is_none());
    }

    #[test]
    fn skill_point_detail() {
        let detail = SkillPointsErrorDetail::new(vec!["a".to_string()]);
        let body = ErrorBody {
            detail: serde_json::to_value(&detail).expect("serialize"),
        };
        assert_eq!(body.skill_points(), Some(detail));
        assert_eq!(body.detail["error"], "skill_points_limit_exceeded");
    }
}
