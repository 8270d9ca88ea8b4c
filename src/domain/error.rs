// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection failed to endpoint: {0}")]
    Connection(String),

    #[error("Routing service error: {0}")]
    Routing(String),

    #[error("Approval failed: {0}")]
    Approval(String),

    #[error("Submission rejected: {0}")]
    Submission(String),

    #[error("Confirmation timed out after {waited_ms} ms for operation {user_op_hash}")]
    ConfirmationTimeout { user_op_hash: String, waited_ms: u64 },

    #[error("Validation failed for field {field}: {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
