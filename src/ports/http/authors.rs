// src/ports/http/authors.rs
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use super::context::run_blocking;
use super::{ApiError, AppContext};
use crate::application::AuthorQuery;
use crate::domain::AuthorName;

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(rename = "firstName")]
    first_name: Option<String>,
}

pub fn router() -> Router<AppContext> {
    Router::new()
        .route("/authors", get(search_authors))
        // Path used by the first release of the search page
        .route("/books", get(search_authors))
}

async fn search_authors(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<AuthorName>>, ApiError> {
    let query = AuthorQuery::parse(params.first_name.as_deref())?;
    let authors = run_blocking(move || ctx.authors.search_authors(&query)).await?;
    info!(count = authors.len(), "Author search served");
    Ok(Json(authors))
}
