use axum::response::{Html, Redirect};

use crate::table::render_about_page;

pub async fn index() -> Redirect {
    Redirect::to("/nba")
}

pub async fn about() -> Html<String> {
    Html(render_about_page())
}
