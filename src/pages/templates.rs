//! Templates Page
//!
//! Template list plus an editor with positional `{{n}}` parameters and a
//! live rendered preview.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CreateTemplatePayload};
use crate::context::use_app_context;
use crate::models::{Template, TemplateParameter};
use crate::remote::RemoteCollection;
use crate::template::render_template;

#[component]
pub fn TemplatesPage() -> impl IntoView {
    let ctx = use_app_context();

    let templates = RemoteCollection::<Template>::new();
    let (editing, set_editing) = signal(false);
    let (name, set_name) = signal(String::new());
    let (category, set_category) = signal("utility".to_string());
    let (content, set_content) = signal(String::new());
    let (parameters, set_parameters) = signal(Vec::<TemplateParameter>::new());
    let (saving, set_saving) = signal(false);

    let refetch = move || {
        spawn_local(async move { templates.load(api::templates()).await });
    };

    Effect::new(move |_| refetch());

    let reset_editor = move || {
        set_name.set(String::new());
        set_category.set("utility".to_string());
        set_content.set(String::new());
        set_parameters.set(Vec::new());
        set_editing.set(false);
    };

    // Appending a parameter also appends its placeholder to the body, so
    // parameter N always corresponds to {{N}}.
    let add_parameter = move || {
        set_parameters.update(|params| {
            let n = params.len() + 1;
            params.push(TemplateParameter {
                name: format!("param{n}"),
                example: String::new(),
            });
            set_content.update(|c| {
                if !c.is_empty() && !c.ends_with(' ') {
                    c.push(' ');
                }
                c.push_str(&format!("{{{{{n}}}}}"));
            });
        });
    };

    let preview = move || {
        let values: Vec<String> = parameters
            .get()
            .iter()
            .map(|p| {
                if p.example.is_empty() {
                    format!("[{}]", p.name)
                } else {
                    p.example.clone()
                }
            })
            .collect();
        render_template(&content.get(), &values)
    };

    let save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        set_saving.set(true);
        let payload = CreateTemplatePayload {
            name: name.get().trim().to_string(),
            category: category.get(),
            content: content.get(),
            parameters: parameters.get(),
        };
        spawn_local(async move {
            match api::create_template(&payload).await {
                Ok(_) => {
                    ctx.toast_success("Template created");
                    reset_editor();
                    refetch();
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to create template")),
            }
            set_saving.set(false);
        });
    };

    view! {
        <section class="page">
            <header class="page-header">
                <div>
                    <h1>"Templates"</h1>
                    <p>"Reusable message templates"</p>
                </div>
                <button type="button" class="primary" on:click=move |_| set_editing.set(true)>
                    "New Template"
                </button>
            </header>

            <Show when=move || editing.get()>
                <form class="panel template-editor" on:submit=save>
                    <div class="form-field">
                        <label for="tpl-name">"Name *"</label>
                        <input
                            id="tpl-name"
                            required
                            placeholder="Order confirmation"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-field">
                        <label for="tpl-category">"Category"</label>
                        <select
                            id="tpl-category"
                            on:change=move |ev| set_category.set(event_target_value(&ev))
                        >
                            <option value="utility" selected=move || category.get() == "utility">
                                "Utility"
                            </option>
                            <option value="marketing" selected=move || category.get() == "marketing">
                                "Marketing"
                            </option>
                            <option
                                value="authentication"
                                selected=move || category.get() == "authentication"
                            >
                                "Authentication"
                            </option>
                            <option
                                value="transactional"
                                selected=move || category.get() == "transactional"
                            >
                                "Transactional"
                            </option>
                        </select>
                    </div>

                    <div class="form-field">
                        <label for="tpl-content">"Content *"</label>
                        <textarea
                            id="tpl-content"
                            required
                            rows=4
                            placeholder="Hi {{1}}, your order {{2}} has shipped."
                            prop:value=move || content.get()
                            on:input=move |ev| set_content.set(event_target_value(&ev))
                        ></textarea>
                    </div>

                    <div class="form-field">
                        <div class="field-row">
                            <label>"Parameters"</label>
                            <button type="button" on:click=move |_| add_parameter()>
                                "Add parameter"
                            </button>
                        </div>
                        {move || {
                            parameters
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(i, param)| {
                                    view! {
                                        <div class="param-row">
                                            <span class="param-index">{format!("{{{{{}}}}}", i + 1)}</span>
                                            <input
                                                placeholder="name"
                                                prop:value=param.name.clone()
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    set_parameters.update(|params| {
                                                        if let Some(p) = params.get_mut(i) {
                                                            p.name = value.clone();
                                                        }
                                                    });
                                                }
                                            />
                                            <input
                                                placeholder="example value"
                                                prop:value=param.example.clone()
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    set_parameters.update(|params| {
                                                        if let Some(p) = params.get_mut(i) {
                                                            p.example = value.clone();
                                                        }
                                                    });
                                                }
                                            />
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>

                    <Show when=move || !content.get().is_empty()>
                        <div class="template-preview">
                            <label>"Preview"</label>
                            <div class="preview-bubble">{preview}</div>
                        </div>
                    </Show>

                    <footer class="dialog-footer">
                        <button type="button" on:click=move |_| reset_editor()>
                            "Cancel"
                        </button>
                        <button type="submit" class="primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Create Template" }}
                        </button>
                    </footer>
                </form>
            </Show>

            <Show
                when=move || !templates.loading.get()
                fallback=|| view! { <p class="hint">"Loading templates..."</p> }
            >
                <Show
                    when=move || !templates.items.get().is_empty()
                    fallback=|| view! { <p class="hint">"No templates yet"</p> }
                >
                    <div class="card-grid">
                        <For
                            each=move || templates.items.get()
                            key=|t| t.id.clone()
                            children=move |template| {
                                view! {
                                    <div class="template-card">
                                        <header>
                                            <h3>{template.name.clone()}</h3>
                                            <span class=format!("status-badge status-{}", template.status)>
                                                {template.status.clone()}
                                            </span>
                                        </header>
                                        <span class="tag">{template.category.clone()}</span>
                                        <p class="template-body">{template.content.clone()}</p>
                                        <p class="hint">
                                            {format!("{} parameters", template.parameters.len())}
                                        </p>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}
