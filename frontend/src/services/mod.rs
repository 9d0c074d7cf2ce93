//! Backend services.
//!
//! # Services
//!
//! - [`api`] - Shared HTTP client with session cookies and the 401 policy
//! - [`upload`] - Spreadsheet upload to `/api/cargar-excel/`

pub mod api;
pub mod upload;

pub use api::*;
pub use upload::*;
