//! Campaign Wizard
//!
//! Three-step modal: Audience (name + source, sheet validation) → Message
//! (template + parameters with live preview) → Launch (review + create).

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::models::Template;
use crate::template::{placeholder_count, render_template};
use crate::wizard::{can_advance, SourceType, WizardForm, WizardStep};

#[component]
pub fn CampaignWizard(
    open: RwSignal<bool>,
    #[prop(into)] on_success: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    let (step, set_step) = signal(WizardStep::Audience);
    let (form, set_form) = signal(WizardForm::default());
    let (validating, set_validating) = signal(false);
    let (launching, set_launching) = signal(false);
    let (templates, set_templates) = signal(Vec::<Template>::new());
    let (selected_template, set_selected_template) = signal(None::<Template>);
    let (param_values, set_param_values) = signal(Vec::<String>::new());

    // Templates load once the wizard is first opened.
    Effect::new(move |_| {
        if !open.get() || !templates.get().is_empty() {
            return;
        }
        spawn_local(async move {
            match api::templates().await {
                Ok(list) => {
                    set_selected_template.set(list.first().cloned());
                    set_templates.set(list);
                }
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("failed to fetch templates: {err}").into(),
                    );
                }
            }
        });
    });

    let reset = move || {
        set_step.set(WizardStep::Audience);
        set_form.set(WizardForm::default());
        set_validating.set(false);
        set_launching.set(false);
        set_param_values.set(Vec::new());
        set_selected_template.set(templates.get().first().cloned());
    };

    let close = move || {
        reset();
        open.set(false);
    };

    let validate_sheet = move || {
        let sheet_url = form.get().sheet_url;
        if sheet_url.trim().is_empty() {
            return;
        }
        set_validating.set(true);
        spawn_local(async move {
            match api::validate_sheet(&sheet_url).await {
                Ok(result) if result.valid => {
                    let sheet_name = result.sheet_names.first().cloned().unwrap_or_default();
                    let count = api::preview_sheet(&sheet_url, &sheet_name)
                        .await
                        .map(|preview| preview.total_rows)
                        .unwrap_or(0);
                    set_form.update(|f| {
                        f.sheet_valid = true;
                        f.contact_count = count;
                    });
                }
                Ok(result) => ctx.toast_error(if result.message.is_empty() {
                    "Failed to validate sheet".to_string()
                } else {
                    result.message
                }),
                Err(err) => ctx.toast_error(err.user_message("Failed to validate sheet")),
            }
            set_validating.set(false);
        });
    };

    let next = move || match can_advance(step.get(), &form.get()) {
        Ok(()) => set_step.set(step.get().next()),
        Err(msg) => ctx.toast_error(msg),
    };

    let launch = move || {
        let Some(template) = selected_template.get() else {
            ctx.toast_error("Please select a template");
            return;
        };
        set_launching.set(true);

        let values = param_values.get();
        let parameters: HashMap<String, String> = template
            .parameters
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let value = values
                    .get(i)
                    .filter(|v| !v.is_empty())
                    .cloned()
                    .unwrap_or_else(|| param.example.clone());
                (param.name.clone(), value)
            })
            .collect();

        let payload = api::CreateCampaignPayload {
            name: form.get().name.trim().to_string(),
            sheet_url: form.get().sheet_url,
            sheet_name: None,
            template_id: Some(template.id.clone()),
            template_parameters: Some(parameters),
        };
        spawn_local(async move {
            match api::create_campaign(&payload).await {
                Ok(_) => {
                    ctx.toast_success("Campaign launched! Messages are being sent.");
                    on_success.run(());
                    reset();
                    open.set(false);
                }
                Err(err) => {
                    ctx.toast_error(err.user_message("Failed to create campaign. Please try again."));
                    set_launching.set(false);
                }
            }
        });
    };

    let preview = move || {
        selected_template
            .get()
            .map(|t| render_template(&t.content, &param_values.get()))
            .unwrap_or_default()
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-overlay">
                <div class="dialog dialog-wide">
                    <header class="dialog-header">
                        <div>
                            <h2>"Create New Campaign"</h2>
                            <p>{move || format!("Step {} of 3", step.get().position())}</p>
                        </div>
                        <button type="button" class="close-btn" on:click=move |_| close()>
                            "×"
                        </button>
                    </header>

                    <div class="wizard-progress">
                        {move || {
                            let current = step.get().position();
                            (1..=3)
                                .map(|s| {
                                    let class = if s <= current {
                                        "progress-segment filled"
                                    } else {
                                        "progress-segment"
                                    };
                                    view! { <div class=class></div> }
                                })
                                .collect_view()
                        }}
                        <div class="wizard-labels">
                            <span>"Audience"</span>
                            <span>"Message"</span>
                            <span>"Launch"</span>
                        </div>
                    </div>

                    <div class="wizard-body">
                        <Show when=move || step.get() == WizardStep::Audience>
                            <div class="form-field">
                                <label>"Campaign Name"</label>
                                <input
                                    placeholder="e.g., Diwali Sale Blast"
                                    prop:value=move || form.get().name
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        set_form.update(|f| f.name = value);
                                    }
                                />
                            </div>

                            <div class="source-picker">
                                <button
                                    type="button"
                                    class=move || {
                                        if form.get().source == SourceType::Contacts {
                                            "source-card active"
                                        } else {
                                            "source-card"
                                        }
                                    }
                                    on:click=move |_| set_form.update(|f| f.source = SourceType::Contacts)
                                >
                                    <h3>"Select from Contacts"</h3>
                                    <p>"Filter by tags and select contacts"</p>
                                </button>
                                <button
                                    type="button"
                                    class=move || {
                                        if form.get().source == SourceType::Sheet {
                                            "source-card active"
                                        } else {
                                            "source-card"
                                        }
                                    }
                                    on:click=move |_| set_form.update(|f| f.source = SourceType::Sheet)
                                >
                                    <h3>"Import from Google Sheet"</h3>
                                    <p>"Paste your sheet URL"</p>
                                </button>
                            </div>

                            <Show when=move || form.get().source == SourceType::Sheet>
                                <div class="form-field">
                                    <label>"Google Sheet URL"</label>
                                    <div class="verify-row">
                                        <input
                                            placeholder="https://docs.google.com/spreadsheets/d/..."
                                            prop:value=move || form.get().sheet_url
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                set_form.update(|f| {
                                                    f.sheet_url = value;
                                                    // Edits invalidate earlier validation.
                                                    f.sheet_valid = false;
                                                });
                                            }
                                        />
                                        <button
                                            type="button"
                                            disabled=move || {
                                                validating.get() || form.get().sheet_url.trim().is_empty()
                                            }
                                            on:click=move |_| validate_sheet()
                                        >
                                            {move || if validating.get() { "Checking..." } else { "Validate" }}
                                        </button>
                                    </div>
                                    <Show when=move || form.get().sheet_valid>
                                        <p class="verify-ok">
                                            {move || format!("Found {} contacts", form.get().contact_count)}
                                        </p>
                                    </Show>
                                </div>
                            </Show>

                            <Show when=move || form.get().source == SourceType::Contacts>
                                <p class="notice">
                                    "Contact filtering will be available in the next version. For now, please use Google Sheets import."
                                </p>
                            </Show>
                        </Show>

                        <Show when=move || step.get() == WizardStep::Message>
                            <div class="template-picker">
                                <label>"Select Template"</label>
                                <For
                                    each=move || templates.get()
                                    key=|t| t.id.clone()
                                    children=move |template| {
                                        let id = template.id.clone();
                                        let select = template.clone();
                                        let card_class = move || {
                                            if selected_template.get().map(|t| t.id.clone())
                                                == Some(id.clone())
                                            {
                                                "template-card active"
                                            } else {
                                                "template-card"
                                            }
                                        };
                                        view! {
                                            <button
                                                type="button"
                                                class=card_class
                                                on:click=move |_| {
                                                    set_param_values.set(Vec::new());
                                                    set_selected_template.set(Some(select.clone()));
                                                }
                                            >
                                                <h3>{template.name.clone()}</h3>
                                                <p>{template.content.clone()}</p>
                                            </button>
                                        }
                                    }
                                />
                            </div>

                            <div class="template-preview">
                                <label>"Preview"</label>
                                <div class="preview-bubble">{preview}</div>

                                {move || {
                                    let slots = selected_template
                                        .get()
                                        .map(|t| placeholder_count(&t.content))
                                        .unwrap_or(0);
                                    (0..slots)
                                        .map(|i| {
                                            view! {
                                                <div class="form-field">
                                                    <label>{format!("Value for {{{{{}}}}}", i + 1)}</label>
                                                    <input
                                                        prop:value=move || {
                                                            param_values.get().get(i).cloned().unwrap_or_default()
                                                        }
                                                        on:input=move |ev| {
                                                            let value = event_target_value(&ev);
                                                            set_param_values.update(|values| {
                                                                if values.len() <= i {
                                                                    values.resize(i + 1, String::new());
                                                                }
                                                                values[i] = value;
                                                            });
                                                        }
                                                    />
                                                </div>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </Show>

                        <Show when=move || step.get() == WizardStep::Launch>
                            <div class="launch-summary">
                                <h3>"Ready to Launch!"</h3>
                                <dl>
                                    <dt>"Campaign Name:"</dt>
                                    <dd>{move || form.get().name}</dd>
                                    <dt>"Recipients:"</dt>
                                    <dd>{move || format!("{} contacts", form.get().contact_count)}</dd>
                                    <dt>"Template:"</dt>
                                    <dd>
                                        {move || {
                                            selected_template.get().map(|t| t.name).unwrap_or_default()
                                        }}
                                    </dd>
                                    <dt>"Source:"</dt>
                                    <dd>"Google Sheets"</dd>
                                </dl>
                                <div class="preview-mono">{preview}</div>
                                <p class="notice">
                                    "Messages will be sent immediately after launch. You can monitor the progress from the campaigns dashboard."
                                </p>
                            </div>
                        </Show>
                    </div>

                    <footer class="dialog-footer">
                        <button
                            type="button"
                            on:click=move |_| {
                                if step.get() == WizardStep::Audience {
                                    close();
                                } else {
                                    set_step.set(step.get().back());
                                }
                            }
                        >
                            {move || if step.get() == WizardStep::Audience { "Cancel" } else { "Back" }}
                        </button>

                        <Show
                            when=move || step.get() != WizardStep::Launch
                            fallback=move || {
                                view! {
                                    <button
                                        type="button"
                                        class="primary"
                                        disabled=move || launching.get()
                                        on:click=move |_| launch()
                                    >
                                        {move || if launching.get() { "Launching..." } else { "Launch Campaign" }}
                                    </button>
                                }
                            }
                        >
                            <button
                                type="button"
                                class="primary"
                                disabled=move || can_advance(step.get(), &form.get()).is_err()
                                on:click=move |_| next()
                            >
                                "Next"
                            </button>
                        </Show>
                    </footer>
                </div>
            </div>
        </Show>
    }
}
