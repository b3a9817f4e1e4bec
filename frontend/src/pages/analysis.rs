use crate::api;
use crate::components::results::render_results;
use crate::components::utils::{render_error_message, render_spinner};
use shared::route::DEFAULT_FIELD_ID;
use shared::{AnalysisResult, Route, ViewState};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AnalysisPageProps {
    pub upload_id: String,
    pub navigate: Callback<Route>,
}

#[function_component(AnalysisPage)]
pub fn analysis_page(props: &AnalysisPageProps) -> Html {
    let state = use_state(ViewState::<AnalysisResult>::default);

    {
        let state = state.clone();
        use_effect_with(props.upload_id.clone(), move |upload_id| {
            let cancelled = Rc::new(Cell::new(false));
            state.set(ViewState::Loading);

            let upload_id = upload_id.clone();
            let guard = cancelled.clone();
            spawn_local(async move {
                let result = api::client().resolve(&upload_id).await;
                // A newer id may have replaced this one while we waited.
                if !guard.get() {
                    state.set(ViewState::from_result(result));
                }
            });

            move || cancelled.set(true)
        });
    }

    let go = |route: Route| {
        let navigate = props.navigate.clone();
        Callback::from(move |_: MouseEvent| navigate.emit(route.clone()))
    };

    let body = match &*state {
        ViewState::Loading => render_spinner("Analyzing your data..."),
        ViewState::Failed(message) => html! {
            <div class="analysis-error">
                { render_error_message(Some(message.as_str())) }
                <button class="analyze-btn" onclick={go(Route::Upload)}>
                    <i class="fa-solid fa-arrow-left"></i>{" Back to Upload"}
                </button>
            </div>
        },
        ViewState::Loaded(result) => html! {
            <>
                { render_results(result) }
                <div class="button-container">
                    <button class="analyze-btn" onclick={go(Route::Upload)}>
                        <i class="fa-solid fa-upload"></i>{" Upload Another"}
                    </button>
                    <button class="analyze-btn" onclick={go(Route::Alerts(DEFAULT_FIELD_ID.to_string()))}>
                        <i class="fa-solid fa-triangle-exclamation"></i>{" View Field Alerts"}
                    </button>
                </div>
            </>
        },
    };

    html! {
        <div class="page analysis-page">
            <h1>{ Route::Analysis(props.upload_id.clone()).title() }</h1>
            { body }
        </div>
    }
}
