//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="app-footer">
            <p>"© 2025 CONMETAL"</p>
        </footer>
    }
}
