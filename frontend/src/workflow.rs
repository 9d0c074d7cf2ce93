//! Upload workflow state machine.
//!
//! The component feeds user and transport events into [`UploadState::apply`]
//! and performs the returned [`Effect`]. The state decides what is rendered;
//! the text helpers at the bottom are the exact strings shown to the user.

use crate::config::ACCEPTED_EXTENSIONS;
use crate::types::{RowError, UploadError, UploadResult};

/// Where the upload form currently is.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
    Succeeded(UploadResult),
    Failed(String),
}

/// Something that happened to the form.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadEvent {
    /// User picked a file with this name.
    FileSelected(String),
    /// The transport settled.
    UploadFinished(Result<UploadResult, UploadError>),
}

/// Side effect the component must carry out after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send the selected file to the backend.
    StartUpload,
    /// Reset the file input so the same name can be picked again.
    ClearInput,
}

impl UploadState {
    /// Advance the state machine, returning what the caller must do next.
    pub fn apply(&mut self, event: UploadEvent) -> Effect {
        match (self.is_uploading(), event) {
            // input is disabled while a request is in flight
            (true, UploadEvent::FileSelected(name)) => {
                log::warn!("Ignoring selection of {} while uploading", name);
                Effect::None
            }
            (_, UploadEvent::FileSelected(name)) => {
                if is_excel_file(&name) {
                    *self = UploadState::Uploading;
                    Effect::StartUpload
                } else {
                    log::warn!("Rejected {}: not an Excel file", name);
                    *self = UploadState::Failed(UploadError::InvalidFileType.user_message());
                    Effect::None
                }
            }
            (true, UploadEvent::UploadFinished(Ok(result))) => {
                log::info!(
                    "✅ {} records processed, {} rejected",
                    result.records_processed,
                    result.errors.len()
                );
                *self = UploadState::Succeeded(result);
                Effect::ClearInput
            }
            // the page is already leaving for the login screen
            (true, UploadEvent::UploadFinished(Err(UploadError::Unauthenticated))) => {
                Effect::None
            }
            (true, UploadEvent::UploadFinished(Err(err))) => {
                log::error!("❌ Upload failed: {}", err);
                *self = UploadState::Failed(err.user_message());
                Effect::None
            }
            (_, UploadEvent::UploadFinished(_)) => {
                log::debug!("Dropping upload completion outside of Uploading");
                Effect::None
            }
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UploadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&UploadResult> {
        match self {
            UploadState::Succeeded(result) => Some(result),
            _ => None,
        }
    }
}

/// Case-sensitive suffix check against the accepted extensions.
pub fn is_excel_file(name: &str) -> bool {
    ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

pub fn success_line(result: &UploadResult) -> String {
    format!("✅ {} registros procesados exitosamente", result.records_processed)
}

pub fn row_error_line(error: &RowError) -> String {
    format!("Fila {}: {} (OT: {})", error.row, error.message, error.work_order_id)
}

/// One line per rejected row, in the order the backend sent them.
pub fn row_error_lines(result: &UploadResult) -> Vec<String> {
    result.errors.iter().map(row_error_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const INVALID: &str = "Por favor, selecciona un archivo Excel (.xlsx o .xls)";

    fn result(value: serde_json::Value) -> UploadResult {
        serde_json::from_value(value).unwrap()
    }

    fn uploading() -> UploadState {
        let mut state = UploadState::Idle;
        assert_eq!(state.apply(UploadEvent::FileSelected("ot.xlsx".into())), Effect::StartUpload);
        state
    }

    #[test]
    fn test_extension_is_case_sensitive_suffix() {
        assert!(is_excel_file("ot.xlsx"));
        assert!(is_excel_file("ot.xls"));
        assert!(is_excel_file("reporte.final.xlsx"));
        assert!(!is_excel_file("ot.csv"));
        assert!(!is_excel_file("ot.XLSX"));
        assert!(!is_excel_file("ot.Xls"));
        assert!(!is_excel_file("ot.xlsx.pdf"));
        assert!(!is_excel_file("ot.xlsm"));
        assert!(!is_excel_file("xlsx"));
    }

    #[test]
    fn test_csv_never_starts_upload() {
        let mut state = UploadState::Idle;
        let effect = state.apply(UploadEvent::FileSelected("ot.csv".into()));
        assert_eq!(effect, Effect::None);
        assert_eq!(state, UploadState::Failed(INVALID.to_string()));
    }

    #[test]
    fn test_invalid_names_always_fail_without_upload() {
        for name in ["ot.csv", "ot.XLSX", "ot.ods", "ot", "ot.xlsx ", ""] {
            let mut state = UploadState::Succeeded(result(json!({ "registros_procesados": 1 })));
            assert_eq!(state.apply(UploadEvent::FileSelected(name.into())), Effect::None);
            assert_eq!(state.error_message(), Some(INVALID));
        }
    }

    #[test]
    fn test_valid_selection_starts_upload_and_clears_prior_error() {
        let mut state = UploadState::Failed("Error al cargar el archivo".into());
        assert_eq!(state.apply(UploadEvent::FileSelected("ot.xls".into())), Effect::StartUpload);
        assert!(state.is_uploading());
        assert_eq!(state.error_message(), None);
        assert_eq!(state.result(), None);
    }

    #[test]
    fn test_success_without_errors() {
        let mut state = uploading();
        let report = result(json!({ "registros_procesados": 12, "errores": [] }));
        let effect = state.apply(UploadEvent::UploadFinished(Ok(report)));

        assert_eq!(effect, Effect::ClearInput);
        let shown = state.result().unwrap();
        assert_eq!(success_line(shown), "✅ 12 registros procesados exitosamente");
        assert!(row_error_lines(shown).is_empty());
    }

    #[test]
    fn test_success_with_row_errors() {
        let mut state = uploading();
        let report = result(json!({
            "registros_procesados": 8,
            "errores": [{ "fila": 5, "ot": "OT-100", "error": "Fecha inválida" }]
        }));
        state.apply(UploadEvent::UploadFinished(Ok(report)));

        let shown = state.result().unwrap();
        assert_eq!(success_line(shown), "✅ 8 registros procesados exitosamente");
        assert_eq!(row_error_lines(shown), vec!["Fila 5: Fecha inválida (OT: OT-100)"]);
    }

    #[test]
    fn test_row_errors_keep_received_order() {
        let report = result(json!({
            "registros_procesados": 0,
            "errores": [
                { "fila": 9, "ot": "OT-3", "error": "OT ya existe en el sistema" },
                { "fila": 2, "ot": "OT-1", "error": "Error en conversión de números" },
                { "fila": 4, "ot": "N/A", "error": "Fecha inválida" }
            ]
        }));
        assert_eq!(
            row_error_lines(&report),
            vec![
                "Fila 9: OT ya existe en el sistema (OT: OT-3)",
                "Fila 2: Error en conversión de números (OT: OT-1)",
                "Fila 4: Fecha inválida (OT: N/A)",
            ]
        );
    }

    #[test]
    fn test_transport_failure_keeps_input() {
        let mut state = uploading();
        let effect = state.apply(UploadEvent::UploadFinished(Err(UploadError::Transport(
            "HTTP request failed".into(),
        ))));
        assert_eq!(effect, Effect::None);
        assert_eq!(state, UploadState::Failed("Error al cargar el archivo".into()));
    }

    #[test]
    fn test_backend_failure_shows_backend_message() {
        let mut state = uploading();
        state.apply(UploadEvent::UploadFinished(Err(UploadError::Backend(json!({
            "success": false,
            "message": "No se encontraron columnas reconocibles",
            "error_type": "NO_CANONICAL_COLUMNS"
        })))));
        assert_eq!(state.error_message(), Some("No se encontraron columnas reconocibles"));
    }

    #[test]
    fn test_unauthenticated_does_not_transition() {
        let mut state = uploading();
        let effect = state.apply(UploadEvent::UploadFinished(Err(UploadError::Unauthenticated)));
        assert_eq!(effect, Effect::None);
        assert!(state.is_uploading());
    }

    #[test]
    fn test_selection_ignored_while_uploading() {
        let mut state = uploading();
        assert_eq!(state.apply(UploadEvent::FileSelected("otra.xlsx".into())), Effect::None);
        assert_eq!(state.apply(UploadEvent::FileSelected("otra.csv".into())), Effect::None);
        assert!(state.is_uploading());
    }

    #[test]
    fn test_second_success_replaces_first() {
        let mut state = uploading();
        state.apply(UploadEvent::UploadFinished(Ok(result(json!({
            "registros_procesados": 3,
            "errores": [{ "fila": 2, "ot": "OT-1", "error": "Fecha inválida" }]
        })))));

        assert_eq!(state.apply(UploadEvent::FileSelected("ot.xlsx".into())), Effect::StartUpload);
        assert_eq!(state.result(), None);

        let effect = state.apply(UploadEvent::UploadFinished(Ok(result(json!({
            "registros_procesados": 5,
            "errores": []
        })))));
        assert_eq!(effect, Effect::ClearInput);
        let shown = state.result().unwrap();
        assert_eq!(success_line(shown), "✅ 5 registros procesados exitosamente");
        assert!(row_error_lines(shown).is_empty());
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut state = UploadState::Idle;
        let effect = state.apply(UploadEvent::UploadFinished(Ok(result(json!({
            "registros_procesados": 1
        })))));
        assert_eq!(effect, Effect::None);
        assert_eq!(state, UploadState::Idle);
    }
}
