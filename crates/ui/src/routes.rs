use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, JournalView, PlayView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/play/:slug", PlayView)] Play { slug: String },
        #[route("/journal/:slug", JournalView)] Journal { slug: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Topbar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Topbar() -> Element {
    rsx! {
        nav { class: "topbar",
            h1 { "Mini Games" }
            ul {
                li { Link { to: Route::Home {}, "All Games" } }
            }
        }
    }
}
