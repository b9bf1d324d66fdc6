pub mod business_form;
pub mod dashboard;
pub mod edit_business;
pub mod home;
pub mod list_business;
pub mod not_found;
pub mod signin;

use std::cell::Cell;
use std::rc::Rc;

use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdLayoutDashboard, LdLogOut, LdPlus};
use dioxus_free_icons::Icon;

use dashboard::Dashboard;
use edit_business::EditBusiness;
use home::Home;
use list_business::ListBusiness;
use not_found::NotFound;
use signin::SignIn;

#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/auth/signin?:access_token&:redirect")]
    SignIn {
        access_token: Option<String>,
        redirect: Option<String>,
    },
    #[layout(SessionLayout)]
    #[route("/")]
    Home {},
    #[route("/list-business")]
    ListBusiness {},
    #[layout(AuthGuard)]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/businesses/:id/edit")]
    EditBusiness { id: String },
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Sign-in view that returns to `self` afterwards.
    pub fn sign_in_then(self) -> Route {
        Route::SignIn {
            access_token: None,
            redirect: Some(self.to_string()),
        }
    }
}

/// Header plus page body. Loads the session once so the form knows who is
/// submitting; signed-out visitors can still fill the form in.
#[component]
fn SessionLayout() -> Element {
    let mut auth = use_auth();

    let resource = use_server_future(move || async move { server::api::get_current_user().await })?;
    let result = resource.read().as_ref().cloned();

    // Seed once; a later sign-out must not be undone by the cached result.
    let seeded = use_hook(|| Rc::new(Cell::new(false)));
    if let Some(result) = result {
        if !seeded.replace(true) {
            if let Ok(Some(user)) = result {
                auth.set_user(user);
            }
        }
    }

    let sign_out = move |_| async move {
        if let Err(e) = server::api::sign_out().await {
            tracing::warn!(error = %e, "Sign-out request failed");
        }
        auth.clear_auth();
        navigator().push(Route::Home {});
    };

    let email = auth
        .current_user
        .read()
        .as_ref()
        .map(|u| u.email.clone());

    rsx! {
        header { class: "site-header",
            Link { to: Route::Home {}, class: "site-brand", "Futsal Listings" }
            nav { class: "site-nav",
                Link { to: Route::ListBusiness {}, class: "site-nav-link",
                    Icon { icon: LdPlus, width: 16, height: 16 }
                    "List your court"
                }
                if let Some(email) = email {
                    Link { to: Route::Dashboard {}, class: "site-nav-link",
                        Icon { icon: LdLayoutDashboard, width: 16, height: 16 }
                        "My listings"
                    }
                    span { class: "site-nav-user", "{email}" }
                    button { class: "site-nav-link", r#type: "button", onclick: sign_out,
                        Icon { icon: LdLogOut, width: 16, height: 16 }
                        "Sign out"
                    }
                } else {
                    Link {
                        to: Route::ListBusiness {}.sign_in_then(),
                        class: "site-nav-link",
                        "Sign in"
                    }
                }
            }
        }
        main { class: "site-main", Outlet::<Route> {} }
    }
}

/// Sends signed-out visitors to the sign-in view, then back here.
#[component]
fn AuthGuard() -> Element {
    let route: Route = use_route();
    let auth = use_auth();

    let resource = use_server_future(move || async move { server::api::get_current_user().await })?;
    let signed_in = auth.is_authenticated()
        || matches!(resource.read().as_ref(), Some(Ok(Some(_))));

    if signed_in {
        return rsx! { Outlet::<Route> {} };
    }

    if resource.read().is_some() {
        navigator().replace(route.sign_in_then());
    }
    rsx! {
        div { class: "page-loading",
            p { "Redirecting to sign in..." }
        }
    }
}
