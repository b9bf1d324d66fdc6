use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Field, Form,
    Input,
};

use crate::auth::use_auth;
use crate::routes::Route;

/// Exchange the identity provider's access token for a session cookie.
///
/// The provider redirects here with `?access_token=...`; the exchange runs
/// automatically. Without a token the page offers a field to paste one.
#[component]
pub fn SignIn(access_token: Option<String>, redirect: Option<String>) -> Element {
    let mut auth = use_auth();
    let mut token = use_signal(|| access_token.clone().unwrap_or_default());
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let redirect_target = use_signal(move || redirect);

    let go_to_destination = move || {
        let target = redirect_target
            .read()
            .as_deref()
            .and_then(|path| path.parse::<Route>().ok())
            .unwrap_or(Route::Dashboard {});
        navigator().push(target);
    };

    let exchange = move |value: String| {
        spawn(async move {
            loading.set(true);
            error_msg.set(None);
            match server::api::establish_session(value).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "Signed in");
                    auth.set_user(user);
                    go_to_destination();
                }
                Err(e) => {
                    error_msg.set(Some(AppError::friendly_message(&e.to_string())));
                }
            }
            loading.set(false);
        });
    };

    use_effect(move || {
        if let Some(value) = access_token.clone().filter(|t| !t.is_empty()) {
            exchange(value);
        }
    });

    rsx! {
        div { class: "page page-narrow",
            Card {
                CardHeader {
                    CardTitle { "Sign in" }
                    CardDescription { "Sign in to list and manage your futsal court." }
                }
                Form {
                    onsubmit: move |_| {
                        let value = token.read().trim().to_string();
                        if value.is_empty() {
                            error_msg.set(Some("Please paste your access token.".to_string()));
                        } else {
                            exchange(value);
                        }
                    },
                    CardContent {
                        if let Some(msg) = error_msg() {
                            p { class: "form-error", "{msg}" }
                        }
                        Field { label: "Access token", html_for: "access-token", required: true,
                            Input {
                                id: "access-token",
                                value: token(),
                                required: true,
                                on_input: move |e: FormEvent| token.set(e.value()),
                            }
                        }
                    }
                    CardFooter {
                        Button { button_type: "submit", busy: loading(),
                            if loading() { "Signing in..." } else { "Sign in" }
                        }
                    }
                }
            }
        }
    }
}
