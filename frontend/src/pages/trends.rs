use crate::api;
use crate::components::utils::{render_error_message, render_spinner};
use shared::format::format_timestamp;
use shared::trends::{TrendDirection, TrendSummary, normalized};
use shared::{IndexType, Route, TrendDataResult, ViewState};
use std::cell::Cell;
use std::rc::Rc;
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TrendsPageProps {
    pub dataset_id: String,
}

#[function_component(TrendsPage)]
pub fn trends_page(props: &TrendsPageProps) -> Html {
    let index = use_state(IndexType::default);
    let state = use_state(ViewState::<TrendDataResult>::default);

    {
        let state = state.clone();
        use_effect_with(
            (props.dataset_id.clone(), *index),
            move |(dataset_id, index)| {
                let cancelled = Rc::new(Cell::new(false));
                state.set(ViewState::Loading);

                let dataset_id = dataset_id.clone();
                let index = *index;
                let guard = cancelled.clone();
                spawn_local(async move {
                    let result = api::client().fetch_trends(&dataset_id, index).await;
                    if !guard.get() {
                        state.set(ViewState::from_result(result));
                    }
                });

                move || cancelled.set(true)
            },
        );
    }

    let body = match &*state {
        ViewState::Loading => render_spinner("Loading trend data..."),
        ViewState::Failed(message) => render_error_message(Some(message.as_str())),
        ViewState::Loaded(result) => render_series(result, *index),
    };

    html! {
        <div class="page trends-page">
            <h1>{ Route::Trends(props.dataset_id.clone()).title() }</h1>
            <div class="index-selector">
                { for IndexType::iter().map(|option| {
                    let index = index.clone();
                    html! {
                        <button
                            class={classes!("filter-btn", (option == *index).then_some("selected"))}
                            onclick={Callback::from(move |_| index.set(option))}
                        >
                            { option.label() }
                        </button>
                    }
                })}
            </div>
            { body }
        </div>
    }
}

fn render_series(result: &TrendDataResult, index: IndexType) -> Html {
    let Some(summary) = TrendSummary::from_points(&result.data) else {
        return html! {
            <p class="no-results-message">{ format!("No {} data for {}.", index.label(), result.upload_id) }</p>
        };
    };

    let direction_icon = match summary.direction {
        TrendDirection::Rising => "fa-arrow-trend-up",
        TrendDirection::Falling => "fa-arrow-trend-down",
        TrendDirection::Stable => "fa-arrows-left-right",
    };

    html! {
        <>
            <div class="trend-summary">
                <div class="trend-direction">
                    <i class={classes!("fa-solid", direction_icon)}></i>
                    { format!(" {}", summary.direction.label()) }
                </div>
                { stat("Latest", index.format_value(summary.latest)) }
                { stat("Min", index.format_value(summary.min)) }
                { stat("Max", index.format_value(summary.max)) }
                { stat("Mean", index.format_value(summary.mean)) }
            </div>
            <div class="result-bars">
                { for result.data.iter().zip(normalized(&result.data)).map(|(point, scale)| html! {
                    <div class="result-item">
                        <div class="result-label">{ &point.date }</div>
                        <div class="result-bar-container">
                            <div class="result-bar" style={format!("width: {:.1}%", (scale * 100.0).max(2.0))}></div>
                        </div>
                        <div class="result-value">{ index.format_value(point.value) }</div>
                    </div>
                })}
            </div>
            {
                if result.timestamp.is_empty() {
                    html! {}
                } else {
                    html! { <p class="analysis-meta">{ format!("Generated {}", format_timestamp(&result.timestamp)) }</p> }
                }
            }
        </>
    }
}

fn stat(label: &str, value: String) -> Html {
    html! {
        <div class="trend-stat">
            <span class="label">{ label }</span>
            <span class="value">{ value }</span>
        </div>
    }
}
