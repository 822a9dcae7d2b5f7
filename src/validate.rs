//! Validation and sanitization of caller-supplied tool parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DocsError;

/// Documentation variant a page is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Javascript,
    React,
    Angular,
}

impl Framework {
    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Javascript => "javascript",
            Framework::React => "react",
            Framework::Angular => "angular",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a request targets a guide page or the API reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Guide,
    Api,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Guide => "guide",
            DocType::Api => "api",
        }
    }

    pub fn is_api(self) -> bool {
        matches!(self, DocType::Api)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sanitizes a topic and rejects anything that could escape the docs tree.
///
/// Characters outside `[A-Za-z0-9-_/]` are silently dropped; the traversal
/// checks run on the already-sanitized string, so they cannot be bypassed by
/// padding the pattern with characters sanitization removes.
pub fn validate_topic(raw: &str) -> Result<String, DocsError> {
    if raw.is_empty() {
        return Err(DocsError::InvalidInput(
            "Topic must be a non-empty string".to_string(),
        ));
    }

    let sanitized: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
        .collect();

    if sanitized.is_empty() {
        return Err(DocsError::InvalidInput(
            "Topic contains no valid characters".to_string(),
        ));
    }

    if sanitized.len() > 200 {
        return Err(DocsError::InvalidInput(
            "Topic is too long (max 200 characters)".to_string(),
        ));
    }

    if sanitized.contains("..") || sanitized.starts_with('/') {
        return Err(DocsError::InvalidInput("Invalid topic format".to_string()));
    }

    Ok(sanitized)
}

/// Empty or absent input falls back to `javascript`.
pub fn validate_framework(raw: Option<&str>) -> Result<Framework, DocsError> {
    match raw.unwrap_or("") {
        "" => Ok(Framework::Javascript),
        "javascript" => Ok(Framework::Javascript),
        "react" => Ok(Framework::React),
        "angular" => Ok(Framework::Angular),
        _ => Err(DocsError::InvalidInput(
            "Invalid framework. Must be one of: javascript, react, angular".to_string(),
        )),
    }
}

/// Empty or absent input falls back to `guide`.
pub fn validate_doc_type(raw: Option<&str>) -> Result<DocType, DocsError> {
    match raw.unwrap_or("") {
        "" => Ok(DocType::Guide),
        "guide" => Ok(DocType::Guide),
        "api" => Ok(DocType::Api),
        _ => Err(DocsError::InvalidInput(
            "Invalid type. Must be one of: guide, api".to_string(),
        )),
    }
}

/// Keywords are length-checked only; no characters are stripped.
pub fn validate_keyword(raw: &str) -> Result<&str, DocsError> {
    if raw.is_empty() {
        return Err(DocsError::InvalidInput(
            "Keyword must be a non-empty string".to_string(),
        ));
    }

    if raw.chars().count() > 100 {
        return Err(DocsError::InvalidInput(
            "Keyword is too long (max 100 characters)".to_string(),
        ));
    }

    Ok(raw)
}
