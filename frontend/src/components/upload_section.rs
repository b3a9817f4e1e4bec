use super::utils::{click_element, debounce, first_file};
use crate::pages::upload::{Msg, UploadPage};
use shared::FileKind;
use shared::upload::MetadataField;
use strum::IntoEnumIterator;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

const FILE_INPUT_ID: &str = "file-input";

pub fn render_upload_section(model: &UploadPage, ctx: &Context<UploadPage>) -> Html {
    let kind = model.form.active_kind();
    html! {
        <div class="upload-section">
            { render_kind_selector(model, ctx) }
            { render_file_input_area(model, ctx, kind) }
            { if kind.sends_metadata() { render_metadata_form(model, ctx) } else { html! {} } }
            { render_submit_button(model, ctx) }
        </div>
    }
}

fn render_kind_selector(model: &UploadPage, ctx: &Context<UploadPage>) -> Html {
    let active = model.form.active_kind();
    let locked = model.form.candidate().is_some();

    html! {
        <div class="kind-selector">
            { for FileKind::iter().map(|kind| {
                html! {
                    <button
                        class={classes!("kind-option", (kind == active).then_some("selected"))}
                        disabled={locked && kind != active}
                        onclick={ctx.link().callback(move |_| Msg::SetHint(kind))}
                    >
                        <span class="kind-label">{ kind.label() }</span>
                        <span class="kind-formats">{ kind.formats() }</span>
                    </button>
                }
            })}
        </div>
    }
}

fn render_file_input_area(model: &UploadPage, ctx: &Context<UploadPage>, kind: FileKind) -> Html {
    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);
        input.set_value("");
        file.map(Msg::FileSelected)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <>
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept={kind.accept()}
                style="display: none;"
                onchange={handle_change}
                disabled={model.form.is_uploading()}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, || click_element(FILE_INPUT_ID))}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{ kind.prompt() }</p>
                    <p class="file-types">{"Drag & drop, paste, or click to browse"}</p>
                </div>
            </div>
        </>
    }
}

fn render_metadata_form(model: &UploadPage, ctx: &Context<UploadPage>) -> Html {
    let fields = [
        MetadataField::CropType,
        MetadataField::FieldId,
        MetadataField::Location,
    ];

    html! {
        <div class="metadata-form">
            <h3>{"Field Metadata"}</h3>
            { for fields.into_iter().map(|field| {
                let onchange = ctx.link().callback(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::MetadataChanged(field, input.value())
                });
                html! {
                    <label class="metadata-field">
                        <span>{ field.label() }</span>
                        <input
                            type="text"
                            name={field.form_name()}
                            placeholder={field.placeholder()}
                            value={model.form.metadata.get(field).unwrap_or_default().to_string()}
                            disabled={model.form.is_uploading()}
                            {onchange}
                        />
                    </label>
                }
            })}
        </div>
    }
}

fn render_submit_button(model: &UploadPage, ctx: &Context<UploadPage>) -> Html {
    let link = ctx.link().clone();
    html! {
        <div class="button-container">
            <button
                class="analyze-btn"
                onclick={debounce(300, move || link.send_message(Msg::Submit))}
                disabled={!model.form.can_submit()}
            >
                {
                    if model.form.is_uploading() {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{ format!(" {}", model.form.submit_label()) }</> }
                    } else {
                        html! { <><i class="fa-solid fa-paper-plane"></i>{ format!(" {}", model.form.submit_label()) }</> }
                    }
                }
            </button>
        </div>
    }
}
