//! Carga OT - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading work-order (OT) Excel spreadsheets
//! to the maintenance backend and showing the per-row import report.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  /carga-excel                                                │
//! │  └── UploadForm                                             │
//! │      ├── file input + "Una OT por hoja"                     │
//! │      ├── loading / error / result (UploadState)             │
//! │      └── Instructions (expected columns)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//!            │
//!            ▼
//!   services::upload ──► services::api (cookies, 401 → /login)
//! ```
//!
//! # Modules
//!
//! - [`types`] - Upload report and error types
//! - [`workflow`] - Upload state machine and displayed text
//! - [`components`] - UI components
//! - [`services`] - Backend communication

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod workflow;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{RowError, UploadError, UploadOptions, UploadOutcome, UploadResult};

// Workflow
pub use workflow::{Effect, UploadEvent, UploadState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // one client for every backend call, so the 401 policy covers all of them
    provide_context(ApiClient::new());

    view! {
        <Title text="Carga de Órdenes de Trabajo"/>
        <Router>
            <div class="app-container">
                <main>
                    <Routes>
                        <Route path="/" view=|| view! { <Redirect path="/carga-excel"/> }/>
                        <Route path="/carga-excel" view=UploadForm/>
                    </Routes>
                </main>
                <Footer/>
            </div>
        </Router>
    }
}
