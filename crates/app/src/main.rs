use dioxus::prelude::*;
use shared_types::FeatureFlags;

mod auth;
mod routes;
use auth::AuthState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_config();
        let flags = server::config::feature_flags();

        if flags.telemetry {
            server::telemetry::init_telemetry();
        }

        // Server functions retry the connection and migrations on first use.
        if let Err(e) = server::db::get_db().await {
            tracing::error!(error = %e.message, "Database not ready at startup");
        }

        if flags.s3 {
            match server::storage::assets_store() {
                Ok(store) => store.ensure_bucket().await,
                Err(e) => tracing::warn!(error = %e.message, "Asset storage is not configured"),
            }
        }

        let mut router = dioxus::server::router(App);

        if flags.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        // Base64 inflates uploads by a third; leave headroom above the file limit.
        let max_body = (server::config::max_upload_bytes() as usize) * 2;

        let router = router
            .layer(axum::extract::DefaultBodyLimit::max(max_body))
            .layer(axum::middleware::from_fn(
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();

    use_context_provider(|| flags);
    use_context_provider(AuthState::new);

    rsx! {
        document::Title { "List your futsal court" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "page-loading",
                        p { "Loading..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
