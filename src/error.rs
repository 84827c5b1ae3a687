use thiserror::Error;

use crate::classify::Classification;

/// Failure reported by the outbound invoker. The context forwards it as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Telegram(#[from] teloxide::RequestError),

    #[error("{message}")]
    Message { message: String },

    #[error("{context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// None of the known update kinds is present.
    #[error("update {update_id} carries no known update type")]
    UnknownUpdate { update_id: i64 },

    /// The value an operation needs is absent for this update.
    #[error("\"{operation}\" isn't available for \"{classification}\"")]
    Unavailable {
        operation: &'static str,
        classification: Classification,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub type Result<T> = std::result::Result<T, Error>;
