//! UI serving routes
//!
//! Serves the embedded marketing, login, and dashboard pages. The pages
//! are static HTML variants sharing one stylesheet; dynamic data comes
//! from the JSON API.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../ui/index.html");
const LOGIN_HTML: &str = include_str!("../ui/login.html");
const DASHBOARD_HTML: &str = include_str!("../ui/dashboard.html");
const STYLES_CSS: &str = include_str!("../ui/styles.css");

/// GET /
///
/// Serves the marketing landing page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /login
pub async fn serve_login() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

/// GET /dashboard
pub async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /static/styles.css
pub async fn serve_styles() -> Response {
    (
        StatusCode::OK,
        [("content-type", "text/css")],
        STYLES_CSS,
    )
        .into_response()
}
