mod api;
mod components;
mod pages;

use components::header::Header;
use gloo_events::EventListener;
use pages::alerts::AlertsPage;
use pages::analysis::AnalysisPage;
use pages::trends::TrendsPage;
use pages::upload::UploadPage;
use shared::Route;
use wasm_bindgen::JsValue;
use yew::prelude::*;

enum Msg {
    Navigate(Route),
    PopState,
}

struct App {
    route: Route,
    _popstate_listener: Option<EventListener>,
}

fn current_route() -> Route {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Home)
}

fn push_history(route: &Route) {
    let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
        return;
    };
    if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(&route.to_path())) {
        log::warn!("pushState failed: {:?}", err);
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let listener = web_sys::window().map(|window| {
            EventListener::new(&window, "popstate", move |_| link.send_message(Msg::PopState))
        });

        Self {
            route: current_route(),
            _popstate_listener: listener,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let next = match msg {
            Msg::Navigate(route) => {
                push_history(&route);
                route
            }
            Msg::PopState => current_route(),
        };
        if next == self.route {
            return false;
        }
        log::info!("Navigating to {}", next.to_path());
        self.route = next;
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            document.set_title(&format!("{} | KrishiDrishti", self.route.title()));
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let navigate = ctx.link().callback(Msg::Navigate);

        let page = match &self.route {
            Route::Home | Route::Upload => html! { <UploadPage navigate={navigate.clone()} /> },
            Route::Analysis(upload_id) => html! {
                <AnalysisPage upload_id={upload_id.clone()} navigate={navigate.clone()} />
            },
            Route::Alerts(field_id) => html! {
                <AlertsPage field_id={field_id.clone()} navigate={navigate.clone()} />
            },
            Route::Trends(dataset_id) => html! { <TrendsPage dataset_id={dataset_id.clone()} /> },
            Route::NotFound => html! {
                <div class="page not-found">
                    <h1>{ Route::NotFound.title() }</h1>
                    <button class="analyze-btn" onclick={navigate.reform(|_: MouseEvent| Route::Upload)}>
                        <i class="fa-solid fa-arrow-left"></i>{" Back to Upload"}
                    </button>
                </div>
            },
        };

        html! {
            <div class="container">
                <Header current={self.route.clone()} navigate={navigate.clone()} />

                <main class="main-content">
                    { page }
                </main>

                <footer class="app-footer">
                    <p>{"KrishiDrishti | Crop health monitoring"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
