//! UI Components for the work-order upload application.
//!
//! # Layout Components
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadForm`] - Excel upload with per-row result report

mod footer;
mod upload;

pub use footer::*;
pub use upload::*;
