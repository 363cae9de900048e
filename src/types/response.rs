// src/types/response.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{ParseOutcome, Validate};

// ===== Service Response Types =====

/// Acknowledgement returned by every mutating endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// Turn a non-success acknowledgement into an error
    pub fn ensure_success(self, action: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            anyhow::bail!(
                "{} failed: {} ({})",
                action,
                self.status,
                self.message.as_deref().unwrap_or("no message")
            )
        }
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseAllResponse {
    #[serde(default)]
    pub results: Vec<ParseOutcome>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Validate for ParseAllResponse {
    fn validate(&self) -> Result<()> {
        self.results.validate()
    }
}
