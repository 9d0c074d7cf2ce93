//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **API Types** - Upload response structures as sent by the backend
//! - **Request Types** - Options attached to an upload
//! - **Error Types** - Upload failure taxonomy

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::{GENERIC_UPLOAD_ERROR, INVALID_FILE_MESSAGE};

// =============================================================================
// API Response Types
// =============================================================================

/// Response from `POST /api/cargar-excel/`.
///
/// Field names follow the backend's Spanish JSON keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Work orders stored by the backend
    #[serde(rename = "registros_procesados")]
    pub records_processed: u64,
    /// Rejected rows, in spreadsheet order
    #[serde(rename = "errores", default)]
    pub errors: Vec<RowError>,
    /// Backend summary, e.g. "Carga completada: 8 OT procesadas"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Backend's own count of rejected rows
    #[serde(rename = "total_errores", default, skip_serializing_if = "Option::is_none")]
    pub total_errors: Option<u64>,
}

impl UploadResult {
    /// Whether any row was rejected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A single rejected spreadsheet row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based spreadsheet row (header included)
    #[serde(rename = "fila", deserialize_with = "lenient_row")]
    pub row: u32,
    /// Work order number, or "N/A" when the row had none
    #[serde(rename = "ot", deserialize_with = "lenient_text")]
    pub work_order_id: String,
    /// Human readable reason
    #[serde(rename = "error", deserialize_with = "lenient_text")]
    pub message: String,
    /// Backend category: DUPLICATE, NUMBER_FORMAT, GENERAL...
    #[serde(rename = "tipo", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

// Row fields mirror spreadsheet cells and may arrive as numbers, numeric
// strings or null.

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_row<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let row = match &value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    row.and_then(|r| u32::try_from(r).ok())
        .ok_or_else(|| de::Error::custom(format!("invalid row number: {}", value)))
}

// =============================================================================
// Request Types
// =============================================================================

/// Options sent alongside the spreadsheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Treat every worksheet as one work order.
    pub sheet_per_ot: bool,
}

// =============================================================================
// Error Types
// =============================================================================

/// Why an upload attempt did not produce an [`UploadResult`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum UploadError {
    /// Selected file is not `.xlsx`/`.xls`. Never reaches the network.
    #[error("Invalid file type")]
    InvalidFileType,

    /// Backend answered with a structured error body, kept verbatim.
    #[error("Backend rejected the upload: {0}")]
    Backend(Value),

    /// Network failure or a body that could not be read/decoded.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered 401; the response policy has already redirected.
    #[error("Not authenticated")]
    Unauthenticated,
}

impl UploadError {
    /// Text displayed in the error block.
    ///
    /// Backend bodies are opaque: their `message` string is used when present,
    /// otherwise the generic upload error.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::InvalidFileType => INVALID_FILE_MESSAGE.to_string(),
            UploadError::Backend(body) => body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_UPLOAD_ERROR)
                .to_string(),
            UploadError::Transport(_) | UploadError::Unauthenticated => {
                GENERIC_UPLOAD_ERROR.to_string()
            }
        }
    }
}

/// Result type alias for upload operations.
pub type UploadOutcome<T> = Result<T, UploadError>;
