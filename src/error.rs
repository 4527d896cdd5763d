#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit code reported by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) | AppError::InvalidDate(_) => 2,
            AppError::NotFound(_) => 3,
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                1
            }
            AppError::Serialization(e) => {
                tracing::error!(error = %e, "Serialization error");
                1
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                1
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Validation("x".into()).exit_code(), 2);
        assert_eq!(AppError::InvalidDate("x".into()).exit_code(), 2);
        assert_eq!(AppError::NotFound("x".into()).exit_code(), 3);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(AppError::Storage(io).exit_code(), 1);
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::NotFound("Check-in abc not found".into());
        assert_eq!(err.to_string(), "Not found: Check-in abc not found");
    }
}
