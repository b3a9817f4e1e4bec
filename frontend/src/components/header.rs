use gloo_events::EventListener;
use shared::Route;
use shared::route::DEFAULT_FIELD_ID;
use yew::prelude::*;

const SCROLL_THRESHOLD: f64 = 10.0;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current: Route,
    pub navigate: Callback<Route>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu_open = use_state(|| false);
    let scrolled = use_state(|| false);

    {
        let scrolled = scrolled.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                let target = window.clone();
                EventListener::new(&target, "scroll", move |_| {
                    let offset = window.scroll_y().unwrap_or_default();
                    scrolled.set(offset > SCROLL_THRESHOLD);
                })
            });
            move || drop(listener)
        });
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let links = [
        (Route::Upload, "fa-cloud-arrow-up", "Upload"),
        (Route::Alerts(DEFAULT_FIELD_ID.to_string()), "fa-triangle-exclamation", "Alerts"),
        (Route::Trends(DEFAULT_FIELD_ID.to_string()), "fa-chart-line", "Trends"),
    ];

    html! {
        <header class={classes!("app-header", (*scrolled).then_some("scrolled"))}>
            <a class="brand" href="/" onclick={nav_callback(&props.navigate, &menu_open, Route::Home)}>
                <i class="fa-solid fa-seedling"></i>{" KrishiDrishti"}
            </a>
            <button class="menu-toggle" onclick={toggle_menu} title="Toggle navigation">
                <i class={classes!("fa-solid", if *menu_open { "fa-xmark" } else { "fa-bars" })}></i>
            </button>
            <nav class={classes!("nav-links", (*menu_open).then_some("open"))}>
                { for links.into_iter().map(|(route, icon, label)| {
                    let active = same_section(&props.current, &route);
                    html! {
                        <a
                            href={route.to_path()}
                            class={classes!("nav-link", active.then_some("active"))}
                            onclick={nav_callback(&props.navigate, &menu_open, route.clone())}
                        >
                            <i class={classes!("fa-solid", icon)}></i>{ format!(" {}", label) }
                        </a>
                    }
                })}
            </nav>
        </header>
    }
}

fn nav_callback(
    navigate: &Callback<Route>,
    menu_open: &UseStateHandle<bool>,
    route: Route,
) -> Callback<MouseEvent> {
    let navigate = navigate.clone();
    let menu_open = menu_open.clone();
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        menu_open.set(false);
        navigate.emit(route.clone());
    })
}

fn same_section(current: &Route, link: &Route) -> bool {
    matches!(
        (current, link),
        (Route::Home | Route::Upload, Route::Upload)
            | (Route::Analysis(_), Route::Upload)
            | (Route::Alerts(_), Route::Alerts(_))
            | (Route::Trends(_), Route::Trends(_))
    )
}
