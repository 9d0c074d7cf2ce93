//! Work-order spreadsheet upload form.
//!
//! Drives [`UploadState`] from the file input and the transport, and renders
//! whichever state is current.

use leptos::*;
use web_sys::{Event, HtmlInputElement};

use crate::config::{ACCEPT_ATTR, OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
use crate::services::{upload_spreadsheet, ApiClient};
use crate::types::{UploadOptions, UploadResult};
use crate::workflow::{row_error_lines, success_line, Effect, UploadEvent, UploadState};

/// Upload page: owns the form state and hands it to [`UploadPanel`].
#[component]
pub fn UploadForm() -> impl IntoView {
    let state = create_rw_signal(UploadState::Idle);
    let options = create_rw_signal(UploadOptions::default());
    let file_input = create_node_ref::<html::Input>();

    view! { <UploadPanel state=state options=options file_input=file_input/> }
}

/// Feed one event to the state machine and carry out its effect on the
/// file input. Uploads are started by the caller.
pub fn dispatch(
    state: RwSignal<UploadState>,
    file_input: NodeRef<html::Input>,
    event: UploadEvent,
) -> Effect {
    let effect = state.try_update(|s| s.apply(event)).unwrap_or(Effect::None);
    if effect == Effect::ClearInput {
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    }
    effect
}

/// File input, status area and column help, rendered from `state`.
#[component]
pub fn UploadPanel(
    state: RwSignal<UploadState>,
    options: RwSignal<UploadOptions>,
    file_input: NodeRef<html::Input>,
) -> impl IntoView {
    let client = store_value(use_context::<ApiClient>().unwrap_or_default());

    let is_uploading = move || state.with(UploadState::is_uploading);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let effect = dispatch(state, file_input, UploadEvent::FileSelected(file.name()));
        if effect != Effect::StartUpload {
            return;
        }

        let upload_options = options.get_untracked();
        spawn_local(async move {
            let outcome = upload_spreadsheet(&client.get_value(), &file, upload_options).await;
            dispatch(state, file_input, UploadEvent::UploadFinished(outcome));
        });
    };

    let on_sheet_per_ot = move |ev: Event| {
        let checked = event_target_checked(&ev);
        options.update(|o| o.sheet_per_ot = checked);
    };

    view! {
        <div class="upload-container">
            <h2>"Carga de Órdenes de Trabajo"</h2>

            <div class="upload-section">
                <div class="file-input-container">
                    <input
                        type="file"
                        accept=ACCEPT_ATTR
                        node_ref=file_input
                        disabled=is_uploading
                        on:change=on_file_change
                    />

                    <label class="sheet-per-ot">
                        <input
                            type="checkbox"
                            prop:checked=move || options.get().sheet_per_ot
                            disabled=is_uploading
                            on:change=on_sheet_per_ot
                        />
                        " Una OT por hoja"
                    </label>

                    <Show
                        when=is_uploading
                        fallback=|| view! { }
                    >
                        <div class="loading-indicator">"Cargando archivo..."</div>
                    </Show>
                </div>

                {move || state.with(|s| match s {
                    UploadState::Idle | UploadState::Uploading => ().into_view(),
                    UploadState::Failed(message) => view! {
                        <div class="error-message" role="alert">{message.clone()}</div>
                    }.into_view(),
                    UploadState::Succeeded(result) => view! {
                        <ResultPanel result=result.clone()/>
                    }.into_view(),
                })}

                <Instructions/>
            </div>
        </div>
    }
}

/// Success summary and, when rows were rejected, the error list.
#[component]
fn ResultPanel(result: UploadResult) -> impl IntoView {
    let has_errors = result.has_errors();
    let lines = row_error_lines(&result);

    view! {
        <div class="result-container">
            <h3>"Resultado de la carga:"</h3>
            <p class="result-summary">{success_line(&result)}</p>
            {has_errors.then(move || view! {
                <div class="row-errors">
                    <h4>"Errores encontrados:"</h4>
                    <ul class="row-error-list" style="max-height: 200px; overflow-y: auto;">
                        {lines
                            .into_iter()
                            .map(|line| view! { <li class="row-error">{line}</li> })
                            .collect_view()}
                    </ul>
                </div>
            })}
        </div>
    }
}

/// Static help: which columns the backend reads.
#[component]
fn Instructions() -> impl IntoView {
    let columns = |names: &'static [&'static str]| {
        names
            .iter()
            .map(|name| view! { <li>{*name}</li> })
            .collect_view()
    };

    view! {
        <div class="instructions">
            <h4>"Instrucciones:"</h4>
            <ul>
                <li>"El archivo debe ser formato Excel (.xlsx o .xls)"</li>
                <li>
                    "Columnas requeridas:"
                    <ul>{columns(&REQUIRED_COLUMNS)}</ul>
                </li>
                <li>
                    "Columnas opcionales:"
                    <ul>{columns(&OPTIONAL_COLUMNS)}</ul>
                </li>
            </ul>
        </div>
    }
}
