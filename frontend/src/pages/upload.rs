use crate::api;
use crate::components::preview_area::render_preview_area;
use crate::components::upload_section::render_upload_section;
use crate::components::utils::{first_file, render_error_message};
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::upload::MetadataField;
use shared::{ClientError, FileKind, Route, UploadForm, UploadResponse};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub enum Msg {
    SetHint(FileKind),
    FileSelected(GlooFile),
    ClearFile,
    MetadataChanged(MetadataField, String),
    Submit,
    Submitted(Result<UploadResponse, ClientError>),
    SetDragging(bool),
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

#[derive(Properties, PartialEq)]
pub struct UploadPageProps {
    pub navigate: Callback<Route>,
}

pub struct UploadPage {
    pub(crate) form: UploadForm<GlooFile>,
    /// Only set for image candidates. Dropping it revokes the URL.
    pub(crate) preview_url: Option<ObjectUrl>,
    pub(crate) is_dragging: bool,
    _paste_listener: Option<EventListener>,
}

impl Component for UploadPage {
    type Message = Msg;
    type Properties = UploadPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let paste_listener = web_sys::window().map(|window| {
            EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            })
        });

        Self {
            form: UploadForm::new(),
            preview_url: None,
            is_dragging: false,
            _paste_listener: paste_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetHint(kind) => {
                if self.form.candidate().is_some() || self.form.hint() == kind {
                    return false;
                }
                self.form.set_hint(kind);
                true
            }
            Msg::FileSelected(file) => self.handle_file_selected(file),
            Msg::ClearFile => {
                let hint = self.form.active_kind();
                let metadata = std::mem::take(&mut self.form.metadata);
                self.form = UploadForm::new();
                self.form.set_hint(hint);
                self.form.metadata = metadata;
                self.preview_url = None;
                true
            }
            Msg::MetadataChanged(field, value) => {
                self.form.metadata.set(field, value);
                true
            }
            Msg::Submit => self.handle_submit(ctx),
            Msg::Submitted(outcome) => {
                if let Err(err) = &outcome {
                    log::error!("Upload failed: {}", err);
                }
                if let Some(route) = self.form.finish_submit(outcome) {
                    ctx.props().navigate.emit(route);
                }
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => {
                event.prevent_default();
                self.is_dragging = false;
                if let Some(file) = event
                    .data_transfer()
                    .and_then(|data| data.files())
                    .as_ref()
                    .and_then(first_file)
                {
                    return self.handle_file_selected(file);
                }
                true
            }
            Msg::HandlePaste(event) => {
                let Some(file) = event
                    .clipboard_data()
                    .and_then(|data| data.files())
                    .as_ref()
                    .and_then(first_file)
                else {
                    return false;
                };
                event.prevent_default();
                self.handle_file_selected(file)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="page upload-page">
                <h1>{ Route::Upload.title() }</h1>
                <p class="subtitle">
                    {"Upload hyperspectral imagery, sensor readings or crop photos for analysis"}
                </p>
                { render_upload_section(self, ctx) }
                { render_preview_area(self, ctx) }
                { render_error_message(self.form.error()) }
            </div>
        }
    }
}

impl UploadPage {
    fn handle_file_selected(&mut self, file: GlooFile) -> bool {
        if self.form.is_uploading() {
            return false;
        }
        let name = file.name();
        let mime = file.raw_mime_type();
        // The old preview is revoked when replaced.
        self.preview_url = None;

        match self.form.select(file.clone(), &name, &mime) {
            Ok(kind) if kind.has_preview() => {
                self.preview_url = Some(ObjectUrl::from(file));
            }
            Ok(kind) => log::info!("Selected {} ({})", name, kind),
            Err(err) => log::warn!("Rejected {}: {}", name, err),
        }
        true
    }

    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        let Some((candidate, metadata)) = self.form.begin_submit() else {
            return true;
        };

        ctx.link().send_future(async move {
            let outcome = api::client().submit(&candidate, &metadata).await;
            Msg::Submitted(outcome)
        });
        true
    }
}
