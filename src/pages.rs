use axum::{
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use crate::{auth::session::MaybeAuthUser, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index_page))
        .route("/login", get(login_page))
        .route("/signup", get(signup_page))
        .nest_service("/static", ServeDir::new("static"))
}

/// Dashboard shell. Anonymous visitors are sent to the login page.
pub async fn index_page(MaybeAuthUser(user): MaybeAuthUser) -> Response {
    match user {
        Some(_) => Html(include_str!("../static/index.html")).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

pub async fn login_page(MaybeAuthUser(user): MaybeAuthUser) -> Response {
    match user {
        Some(_) => Redirect::to("/").into_response(),
        None => Html(include_str!("../static/login.html")).into_response(),
    }
}

pub async fn signup_page(MaybeAuthUser(user): MaybeAuthUser) -> Response {
    match user {
        Some(_) => Redirect::to("/").into_response(),
        None => Html(include_str!("../static/signup.html")).into_response(),
    }
}
