//! Storage failures reported by the repositories.

/// What went wrong talking to the character store.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The query itself failed; `operation` names the repository call.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored row could not be turned back into a domain value
    /// (bad uuid, unknown system, malformed JSON column).
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn database(operation: &'static str, err: impl ToString) -> Self {
        Self::Database {
            operation,
            message: err.to_string(),
        }
    }

    pub fn corrupt(err: impl ToString) -> Self {
        Self::Corrupt(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_call() {
        let err = RepoError::database("list_characters", "disk I/O error");
        assert_eq!(
            err.to_string(),
            "Database error in list_characters: disk I/O error"
        );
        assert!(!err.is_not_found());
        assert!(RepoError::not_found("Character", "abc").is_not_found());
    }
}
