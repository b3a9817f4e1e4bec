use crate::api;
use crate::components::utils::{render_error_message, render_spinner};
use shared::alerts::{SeverityCounts, SeverityFilter, filter_alerts};
use shared::format::format_timestamp;
use shared::{Alert, Route, Severity, ViewState};
use std::cell::Cell;
use std::rc::Rc;
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertsPageProps {
    pub field_id: String,
    pub navigate: Callback<Route>,
}

#[function_component(AlertsPage)]
pub fn alerts_page(props: &AlertsPageProps) -> Html {
    let state = use_state(ViewState::<Vec<Alert>>::default);
    let filter = use_state(SeverityFilter::default);

    {
        let state = state.clone();
        use_effect_with(props.field_id.clone(), move |field_id| {
            let cancelled = Rc::new(Cell::new(false));
            state.set(ViewState::Loading);

            let field_id = field_id.clone();
            let guard = cancelled.clone();
            spawn_local(async move {
                let result = api::client().fetch_alerts(&field_id).await;
                if !guard.get() {
                    state.set(ViewState::from_result(result));
                }
            });

            move || cancelled.set(true)
        });
    }

    let on_field_change = {
        let navigate = props.navigate.clone();
        let current = props.field_id.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let field_id = input.value().trim().to_string();
            if !field_id.is_empty() && field_id != current {
                navigate.emit(Route::Alerts(field_id));
            }
        })
    };

    let body = match &*state {
        ViewState::Loading => render_spinner("Loading alerts..."),
        ViewState::Failed(message) => render_error_message(Some(message.as_str())),
        ViewState::Loaded(alerts) if alerts.is_empty() => html! {
            <div class="empty-state">
                <i class="fa-solid fa-circle-check fa-2x"></i>
                <p>{ format!("No alerts for {}. Your field looks healthy.", props.field_id) }</p>
            </div>
        },
        ViewState::Loaded(alerts) => render_alerts(alerts, &filter),
    };

    html! {
        <div class="page alerts-page">
            <h1>{ Route::Alerts(props.field_id.clone()).title() }</h1>
            <label class="field-picker">
                <span>{"Field ID"}</span>
                <input type="text" value={props.field_id.clone()} onchange={on_field_change} />
            </label>
            { body }
        </div>
    }
}

fn render_alerts(alerts: &[Alert], filter: &UseStateHandle<SeverityFilter>) -> Html {
    let counts = SeverityCounts::from_alerts(alerts);
    let shown = filter_alerts(alerts, **filter);

    html! {
        <>
            <div class="severity-summary">
                { for Severity::iter().map(|severity| html! {
                    <div class={classes!("severity-count", severity.to_string())}>
                        <span class="count">{ counts.get(severity).to_string() }</span>
                        <span class="label">{ severity.label() }</span>
                    </div>
                })}
            </div>
            <div class="severity-filter">
                { for SeverityFilter::ALL.into_iter().map(|option| {
                    let filter = filter.clone();
                    html! {
                        <button
                            class={classes!("filter-btn", (option == *filter).then_some("selected"))}
                            onclick={Callback::from(move |_| filter.set(option))}
                        >
                            { option.label() }
                        </button>
                    }
                })}
            </div>
            {
                if shown.is_empty() {
                    html! { <p class="no-results-message">{ format!("No {} alerts.", filter.label()) }</p> }
                } else {
                    html! {
                        <div class="alert-list">
                            { for shown.into_iter().map(render_alert) }
                        </div>
                    }
                }
            }
        </>
    }
}

fn render_alert(alert: &Alert) -> Html {
    html! {
        <div class={classes!("alert-card", alert.severity.to_string())} key={alert.id.to_string()}>
            <div class="alert-header">
                <span class="alert-severity">{ alert.severity.label() }</span>
                <span class="alert-kind">{ format!("{} / {}", alert.kind, alert.subtype) }</span>
                <span class="alert-zone">{ &alert.zone }</span>
            </div>
            <p class="alert-message">{ &alert.message }</p>
            {
                if alert.recommendation.is_empty() {
                    html! {}
                } else {
                    html! { <p class="alert-recommendation"><strong>{"Recommendation: "}</strong>{ &alert.recommendation }</p> }
                }
            }
            <p class="alert-date">{ format_timestamp(&alert.date) }</p>
        </div>
    }
}
