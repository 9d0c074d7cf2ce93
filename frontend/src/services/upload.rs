//! Work-order spreadsheet upload to the backend.

use serde_json::Value;
use web_sys::{File, FormData};

use super::api::{ApiClient, ApiResponse, Navigator, ResponsePolicy};
use crate::config::{SHEET_PER_OT_FIELD, UPLOAD_ENDPOINT, UPLOAD_FIELD};
use crate::types::{UploadError, UploadOptions, UploadOutcome, UploadResult};

/// Upload a spreadsheet and return the backend's per-row report.
///
/// No type or size check happens here; the caller filters files first.
pub async fn upload_spreadsheet<P, N>(
    client: &ApiClient<P, N>,
    file: &File,
    options: UploadOptions,
) -> UploadOutcome<UploadResult>
where
    P: ResponsePolicy,
    N: Navigator,
{
    let form = build_form(file, options)?;

    log::info!(
        "📤 Uploading {} ({} bytes, sheet_per_ot={})",
        file.name(),
        file.size(),
        options.sheet_per_ot
    );

    let response = client.post_form(UPLOAD_ENDPOINT, form).await?;
    decode_upload_response(response)
}

/// Multipart body: the file under `archivo`, plus `sheet_per_ot=true` when set.
pub fn build_form(file: &File, options: UploadOptions) -> UploadOutcome<FormData> {
    let form = FormData::new()
        .map_err(|e| UploadError::Transport(format!("Failed to create FormData: {:?}", e)))?;

    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
        .map_err(|e| UploadError::Transport(format!("Failed to append file: {:?}", e)))?;

    if options.sheet_per_ot {
        form.append_with_str(SHEET_PER_OT_FIELD, "true")
            .map_err(|e| UploadError::Transport(format!("Failed to append option: {:?}", e)))?;
    }

    Ok(form)
}

/// Turn a response into the upload report or the matching error.
///
/// Error bodies that parse as JSON are kept verbatim; anything else
/// (empty, HTML, truncated) becomes a transport error.
pub fn decode_upload_response(response: ApiResponse) -> UploadOutcome<UploadResult> {
    let success = response.is_success();
    let ApiResponse { status, body } = response;
    let body = body.filter(|text| !text.trim().is_empty());

    if success {
        let text = body.ok_or_else(|| {
            UploadError::Transport(format!("Empty response body ({})", status))
        })?;
        return serde_json::from_str(&text)
            .map_err(|e| UploadError::Transport(format!("Failed to parse response: {}", e)));
    }

    match body.as_deref().and_then(|text| serde_json::from_str::<Value>(text).ok()) {
        Some(value) => Err(UploadError::Backend(value)),
        None => Err(UploadError::Transport(format!("Server error ({})", status))),
    }
}
