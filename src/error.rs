/// Unified error type for the agent
/// Provides structured error handling with categories for different failure modes
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AgentError {
    /// Ingestion errors: a dataset file cannot be read or parsed
    #[error("ingestion error: {message}")]
    Ingestion {
        message: String,
        path: Option<String>,
    },

    /// Classification errors: the model call failed or returned an unparseable payload
    #[error("classification error: {message}")]
    Classification { message: String },

    /// Generation errors: the model reply contained no usable SQL
    #[error("generation error: {message}")]
    Generation { message: String },

    /// Execution errors: a SQL statement or a table load failed
    #[error("execution error: {message}")]
    Execution {
        message: String,
        statement: Option<String>,
    },

    /// Backend errors: the model service or the store is unreachable
    #[error("backend unavailable: {message}")]
    Backend { message: String },
}

impl AgentError {
    pub fn ingestion(message: impl Into<String>) -> Self {
        Self::Ingestion {
            message: message.into(),
            path: None,
        }
    }

    pub fn ingestion_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Ingestion {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn classification(message: impl Into<String>) -> Self {
        Self::Classification {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            statement: None,
        }
    }

    pub fn execution_with_statement(
        message: impl Into<String>,
        statement: impl Into<String>,
    ) -> Self {
        Self::Execution {
            message: message.into(),
            statement: Some(statement.into()),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        Self::Ingestion {
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<csv::Error> for AgentError {
    fn from(err: csv::Error) -> Self {
        Self::Ingestion {
            message: err.to_string(),
            path: None,
        }
    }
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
