//! Audit trail of character changes

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{AuditLogId, CharacterId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Publish,
    Unpublish,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Publish => "publish",
            AuditAction::Unpublish => "unpublish",
            AuditAction::Delete => "delete",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(AuditAction::Create),
            "update" => Ok(AuditAction::Update),
            "publish" => Ok(AuditAction::Publish),
            "unpublish" => Ok(AuditAction::Unpublish),
            "delete" => Ok(AuditAction::Delete),
            other => Err(DomainError::parse(format!("unknown audit action: {other}"))),
        }
    }
}

/// One recorded change. The character may no longer exist (deletes are logged too).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    pub user_id: UserId,
    pub character_id: CharacterId,
    pub action: AuditAction,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new(
        id: AuditLogId,
        user_id: UserId,
        character_id: CharacterId,
        action: AuditAction,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            character_id,
            action,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_parse_their_wire_names() {
        for action in [
            AuditAction::Create,
            AuditAction::Update,
            AuditAction::Publish,
            AuditAction::Unpublish,
            AuditAction::Delete,
        ] {
            assert_eq!(action.as_str().parse::<AuditAction>().ok(), Some(action));
        }
        assert!("archive".parse::<AuditAction>().is_err());
    }
}
