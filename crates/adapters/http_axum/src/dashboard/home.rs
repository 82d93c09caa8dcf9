//! Dashboard home page — a card per module the caller may open.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use clinikit_app::page::Card;
use clinikit_app::ports::RoleRepository;

use crate::error::PageError;
use crate::extract::RoleIds;
use crate::state::AppState;

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    cards: Vec<Card>,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /` — cards of every permitted module.
///
/// # Errors
///
/// Returns a [`PageError`] when the role store fails.
pub async fn index<R>(
    State(state): State<AppState<R>>,
    roles: RoleIds,
) -> Result<HomeTemplate, PageError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    let cards = state.modules.permitted_cards(roles.as_deref()).await?;
    Ok(HomeTemplate { cards })
}
