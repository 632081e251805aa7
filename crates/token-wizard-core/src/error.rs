//! Unified error types for the token-wizard toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while generating a contract.
#[derive(Error, Debug)]
pub enum WizardError {
    // --- Parameters ---

    /// Token parameters failed validation (empty name, unusable symbol, ...).
    #[error("invalid token parameters: {0}")]
    InvalidParams(String),

    /// A feature was enabled without the value it needs (e.g. staking without `minStakingDuration`).
    #[error("missing option '{0}' for the enabled feature")]
    MissingOption(&'static str),

    /// A numeric amount is not a plain decimal number.
    #[error("invalid amount for {field}: '{value}'")]
    InvalidAmount { field: &'static str, value: String },

    /// An address is not `0x` followed by 40 hex digits.
    #[error("invalid address: '{0}' (expected 0x followed by 40 hex digits)")]
    InvalidAddress(String),

    // --- Composition ---

    /// The base contract text lacks a structural anchor the layout relies on.
    #[error("base contract has no {0}")]
    MissingAnchor(&'static str),

    /// Handlebars template rendering failed (invalid template or missing variables).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- Request files ---

    /// The request file was not found or could not be read.
    #[error("request file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request file exists but contains invalid JSON.
    #[error("failed to parse request at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- General ---

    /// A catch-all for errors from dependencies and custom providers.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, WizardError>`.
pub type Result<T> = std::result::Result<T, WizardError>;
