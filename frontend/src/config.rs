//! Application configuration.
//!
//! Centralized configuration for the work-order upload frontend.
//! Serving and the `/api` proxy live in `Trunk.toml`; the values here are
//! compiled into the WASM bundle.

/// Backend API base URL.
///
/// Empty means same origin: in development trunk proxies `/api/` to the
/// Django backend on port 8000.
pub const API_BASE_URL: &str = "";

/// Spreadsheet upload endpoint, relative to [`API_BASE_URL`].
pub const UPLOAD_ENDPOINT: &str = "/api/cargar-excel/";

/// Where the whole page is sent when the backend answers 401.
pub const LOGIN_PATH: &str = "/login";

/// Multipart field carrying the spreadsheet.
pub const UPLOAD_FIELD: &str = "archivo";

/// Multipart flag switching the backend to one work order per worksheet.
pub const SHEET_PER_OT_FIELD: &str = "sheet_per_ot";

/// Accepted file-name suffixes (case-sensitive).
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];

/// Value of the file input's `accept` attribute.
pub const ACCEPT_ATTR: &str = ".xlsx,.xls";

/// Shown when the selected file is not an Excel workbook.
pub const INVALID_FILE_MESSAGE: &str = "Por favor, selecciona un archivo Excel (.xlsx o .xls)";

/// Shown when the upload fails without a usable backend message.
pub const GENERIC_UPLOAD_ERROR: &str = "Error al cargar el archivo";

/// Columns the backend requires in the workbook.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Encargado", "Máquina", "Tipo de falla", "Fecha inicio"];

/// Columns the backend reads when present.
pub const OPTIONAL_COLUMNS: [&str; 6] = [
    "Fecha término",
    "DIAS",
    "PERSONAS",
    "HH",
    "Observación",
    "Mantención lograda",
];
