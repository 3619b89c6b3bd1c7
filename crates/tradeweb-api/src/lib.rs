//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: sales/purchase form pages, form edits, submit

pub mod error;
pub mod routes;

use axum::{
    response::Redirect,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tradeweb_config::Config;
use tradeweb_core::{FormRegistry, LogSink, ResultSink};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub forms: Arc<RwLock<FormRegistry>>,
    pub config: Config,
    pub sink: Arc<dyn ResultSink>,
}

impl AppState {
    /// State delivering submissions to `sink`
    pub fn new(config: Config, sink: Arc<dyn ResultSink>) -> Self {
        let forms = FormRegistry::new(config.forms.max_open_forms);
        Self {
            forms: Arc::new(RwLock::new(forms)),
            config,
            sink,
        }
    }

    /// State that logs submissions
    pub fn with_log_sink(config: Config) -> Self {
        Self::new(config, Arc::new(LogSink))
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{
        api_form_snapshot, htmx_add_item, htmx_remove_item, htmx_submit, htmx_update_fields,
        page_purchase, page_sales,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/forms/:id", get(api_form_snapshot))
        // HTMX page routes
        .route("/", get(index_redirect))
        .route("/sales", get(page_sales))
        .route("/purchase", get(page_purchase))
        // HTMX partial routes
        .route("/forms/:id/fields", post(htmx_update_fields))
        .route("/forms/:id/items", post(htmx_add_item))
        .route("/forms/:id/items/:index", delete(htmx_remove_item))
        .route("/forms/:id/submit", post(htmx_submit))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn index_redirect() -> Redirect {
    Redirect::to("/sales")
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Sales &amp; Purchase</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .is-invalid {{ border-color: #dc2626 !important; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
    <div id='toast-region' class='fixed top-4 right-4 z-50'></div>
    <script>
    document.body.addEventListener('htmx:afterSettle', function() {{
        const toast = document.querySelector('#toast-region [data-toast]');
        if (toast) {{ setTimeout(() => toast.remove(), 3000); }}
    }});
    </script>
</body>
</html>"#,
        tradeweb_utils::escape_html(title),
        content
    )
}

/// Top header with the Sales / Purchase navigation
pub fn nav_header(current_path: &str) -> String {
    let links = [
        ("/sales", "Sales", "border-indigo-600 text-indigo-600", "bg-indigo-600 text-white"),
        ("/purchase", "Purchase", "border-green-600 text-green-600", "bg-green-600 text-white"),
    ];

    let mut nav = String::from(
        "<header class='bg-white border-b px-6 py-4 flex items-center'><h2 class='text-xl font-bold'>SALES &amp; PURCHASE SYSTEM</h2><nav class='ml-6 flex gap-2'>",
    );
    for (path, label, idle_class, active_class) in &links {
        let class = if current_path == *path { active_class } else { idle_class };
        nav.push_str(&format!(
            r#"<a href='{}' class='px-4 py-1.5 border rounded-lg {}'>{}</a>"#,
            path, class, label
        ));
    }
    nav.push_str("</nav></header>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!("<main class='p-6'>{}</main>", inner_content)
    } else {
        base_html(
            title,
            &format!(
                "{}<main class='p-6'><div class='max-w-6xl mx-auto'>{}</div></main>",
                nav_header(current_path),
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process stops.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_address();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting server on http://{}", addr);
    log::info!("Available routes: / (redirects to /sales), /sales, /purchase, /api/health");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
