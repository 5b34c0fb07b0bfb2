//! Import Sheets Dialog
//!
//! Validates a Google Sheet URL against the backend, optionally previews
//! rows, then imports by creating a campaign from the validated sheet.
//! Import stays disabled until validation succeeds.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, SheetPreview};
use crate::context::use_app_context;

#[component]
pub fn ImportSheetsDialog(
    open: RwSignal<bool>,
    #[prop(into)] on_success: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    let (sheet_url, set_sheet_url) = signal(String::new());
    let (sheet_valid, set_sheet_valid) = signal(None::<bool>);
    let (sheet_names, set_sheet_names) = signal(Vec::<String>::new());
    let (selected_sheet, set_selected_sheet) = signal(String::new());
    let (preview, set_preview) = signal(None::<SheetPreview>);
    let (validating, set_validating) = signal(false);
    let (working, set_working) = signal(false);

    let reset = move || {
        set_sheet_url.set(String::new());
        set_sheet_valid.set(None);
        set_sheet_names.set(Vec::new());
        set_selected_sheet.set(String::new());
        set_preview.set(None);
        set_validating.set(false);
        set_working.set(false);
    };

    let close = move || {
        reset();
        open.set(false);
    };

    let validate = move || {
        let url = sheet_url.get().trim().to_string();
        if url.is_empty() {
            return;
        }
        set_validating.set(true);
        spawn_local(async move {
            match api::validate_sheet(&url).await {
                Ok(result) if result.valid => {
                    set_selected_sheet.set(result.sheet_names.first().cloned().unwrap_or_default());
                    set_sheet_names.set(result.sheet_names);
                    set_sheet_valid.set(Some(true));
                    ctx.toast_success("Google Sheet validated successfully");
                }
                Ok(result) => {
                    set_sheet_valid.set(Some(false));
                    ctx.toast_error(if result.message.is_empty() {
                        "Failed to validate sheet".to_string()
                    } else {
                        result.message
                    });
                }
                Err(err) => {
                    set_sheet_valid.set(Some(false));
                    ctx.toast_error(err.user_message(
                        "Failed to validate sheet. Make sure it's shared with the service account.",
                    ));
                }
            }
            set_validating.set(false);
        });
    };

    let load_preview = move || {
        let url = sheet_url.get().trim().to_string();
        let sheet = selected_sheet.get();
        if url.is_empty() {
            return;
        }
        set_working.set(true);
        spawn_local(async move {
            match api::preview_sheet(&url, &sheet).await {
                Ok(result) => {
                    ctx.toast_success(format!("Preview loaded: {} rows", result.preview_rows));
                    set_preview.set(Some(result));
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to preview sheet data")),
            }
            set_working.set(false);
        });
    };

    let import = move || {
        if sheet_valid.get() != Some(true) {
            return;
        }
        set_working.set(true);

        let payload = api::CreateCampaignPayload {
            name: format!("Sheet import ({})", sheet_url.get().trim()),
            sheet_url: sheet_url.get().trim().to_string(),
            sheet_name: Some(selected_sheet.get()).filter(|s| !s.is_empty()),
            template_id: None,
            template_parameters: None,
        };
        spawn_local(async move {
            match api::create_campaign(&payload).await {
                Ok(_) => {
                    ctx.toast_success("Contacts imported successfully!");
                    on_success.run(());
                    reset();
                    open.set(false);
                }
                Err(err) => {
                    ctx.toast_error(err.user_message("Failed to import contacts"));
                    set_working.set(false);
                }
            }
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-overlay">
                <div class="dialog dialog-wide">
                    <header class="dialog-header">
                        <h2>"Import from Google Sheets"</h2>
                        <p>
                            "Import contacts from a Google Sheet. Make sure the sheet is shared with the service account."
                        </p>
                    </header>

                    <div class="form-field">
                        <label for="sheet-url">"Google Sheet URL *"</label>
                        <div class="verify-row">
                            <input
                                id="sheet-url"
                                placeholder="https://docs.google.com/spreadsheets/d/..."
                                prop:value=move || sheet_url.get()
                                on:input=move |ev| {
                                    set_sheet_url.set(event_target_value(&ev));
                                    // Edits invalidate earlier validation.
                                    set_sheet_valid.set(None);
                                }
                            />
                            <button
                                type="button"
                                disabled=move || validating.get() || sheet_url.get().trim().is_empty()
                                on:click=move |_| validate()
                            >
                                {move || if validating.get() { "Validating..." } else { "Validate" }}
                            </button>
                        </div>
                        {move || {
                            sheet_valid
                                .get()
                                .map(|valid| {
                                    if valid {
                                        view! {
                                            <p class="verify-ok">"Sheet is valid and accessible"</p>
                                        }
                                            .into_any()
                                    } else {
                                        view! {
                                            <p class="verify-missing">
                                                "Sheet not accessible. Check sharing settings."
                                            </p>
                                        }
                                            .into_any()
                                    }
                                })
                        }}
                    </div>

                    <Show when=move || !sheet_names.get().is_empty()>
                        <div class="form-field">
                            <label for="sheet-name">"Select Sheet"</label>
                            <select
                                id="sheet-name"
                                on:change=move |ev| set_selected_sheet.set(event_target_value(&ev))
                            >
                                <For
                                    each=move || sheet_names.get()
                                    key=|name| name.clone()
                                    children=move |name| {
                                        let value = name.clone();
                                        view! {
                                            <option
                                                value=value.clone()
                                                selected=move || selected_sheet.get() == value
                                            >
                                                {name.clone()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                            <button type="button" disabled=move || working.get() on:click=move |_| load_preview()>
                                "Preview Data"
                            </button>
                        </div>
                    </Show>

                    {move || {
                        preview
                            .get()
                            .filter(|p| !p.data.is_empty())
                            .map(|p| {
                                let columns = p.columns.clone();
                                let shown = p.data.iter().take(5).cloned().collect::<Vec<_>>();
                                let total = p.total_rows;
                                view! {
                                    <div class="sheet-preview">
                                        <label>"Preview (first rows)"</label>
                                        <table>
                                            <thead>
                                                <tr>
                                                    {columns
                                                        .iter()
                                                        .map(|c| view! { <th>{c.clone()}</th> })
                                                        .collect_view()}
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {shown
                                                    .iter()
                                                    .map(|row| {
                                                        let cells = columns
                                                            .iter()
                                                            .map(|c| {
                                                                let text = row
                                                                    .get(c)
                                                                    .map(render_cell)
                                                                    .unwrap_or_default();
                                                                view! { <td>{text}</td> }
                                                            })
                                                            .collect_view();
                                                        view! { <tr>{cells}</tr> }
                                                    })
                                                    .collect_view()}
                                            </tbody>
                                        </table>
                                        <p class="hint">{format!("Showing up to 5 of {total} total rows")}</p>
                                    </div>
                                }
                            })
                    }}

                    <footer class="dialog-footer">
                        <button type="button" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class="primary"
                            disabled=move || working.get() || sheet_valid.get() != Some(true)
                            on:click=move |_| import()
                        >
                            {move || if working.get() { "Importing..." } else { "Import Contacts" }}
                        </button>
                    </footer>
                </div>
            </div>
        </Show>
    }
}

fn render_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
