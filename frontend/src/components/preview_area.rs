use crate::pages::upload::{Msg, UploadPage};
use shared::FileKind;
use shared::format::truncate;
use yew::prelude::*;

const NAME_DISPLAY_LEN: usize = 40;

pub fn render_preview_area(model: &UploadPage, ctx: &Context<UploadPage>) -> Html {
    let Some(candidate) = model.form.candidate() else {
        return html! {};
    };
    let link = ctx.link();

    html! {
        <div id="preview-container">
            {
                if let Some(url) = &model.preview_url {
                    html! {
                        <img id="actual-image-preview"
                            src={url.to_string()}
                            alt="Preview"
                            style="max-width:100%; max-height: 300px; object-fit: contain; margin-bottom: 10px;" />
                    }
                } else {
                    html! {
                        <div class="file-card">
                            <i class={classes!("fa-solid", "fa-3x", kind_icon(candidate.kind()))}></i>
                        </div>
                    }
                }
            }
            <div class="preview-details">
                <span class="file-name" title={candidate.name().to_string()}>{ truncate(candidate.name(), NAME_DISPLAY_LEN) }</span>
                <span class="file-meta">
                    { format!("{} - {}", candidate.kind().label(), format_size(candidate.file().size())) }
                </span>
                <button
                    class="remove-btn"
                    title="Remove this file"
                    disabled={model.form.is_uploading()}
                    onclick={link.callback(|e: MouseEvent| {
                        e.stop_propagation();
                        Msg::ClearFile
                    })}
                >
                    <i class="fa-solid fa-times" style="font-size: 10px;"></i>
                </button>
            </div>
        </div>
    }
}

fn kind_icon(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Image => "fa-image",
        FileKind::Hyperspectral => "fa-layer-group",
        FileKind::Sensor => "fa-file-csv",
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}
