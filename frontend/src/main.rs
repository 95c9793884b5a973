use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod booking;
mod catalog;
mod choreography;
mod components {
    pub mod booking_form;
    pub mod lightbox;
}
mod pages {
    pub mod home;
    pub mod work;
}

use pages::{
    home::Home,
    work::Work,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/work/:slug")]
    Work { slug: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Work { slug } => {
            info!("Rendering Work page for {}", slug);
            html! { <Work slug={slug} /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    html! {
        <div style="min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 2rem;">
            <h1 style="font-family: var(--font-display); font-size: 6rem; text-transform: uppercase; margin: 0;">{"404"}</h1>
            <p style="text-transform: uppercase; letter-spacing: 0.3em; font-size: 0.75rem; opacity: 0.6;">{"Nothing to see here"}</p>
            <Link<Route> to={Route::Home} classes="back-link">{"← Back Home"}</Link<Route>>
        </div>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <div class="grain"></div>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
