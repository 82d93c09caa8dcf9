//! Module pages — main, config, settings and help.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use clinikit_app::page::Page;
use clinikit_app::ports::{ModuleRoute, RoleRepository};
use clinikit_domain::error::{ClinikitError, ForbiddenError, NotFoundError};

use crate::error::PageError;
use crate::extract::RoleIds;
use crate::state::AppState;

/// Module page template.
#[derive(Template)]
#[template(path = "module_page.html")]
pub struct ModulePageTemplate {
    root_path: String,
    page: Page,
}

impl IntoResponse for ModulePageTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Render the page a module registered for `route`, if the caller's roles
/// grant access to the module.
///
/// # Errors
///
/// Returns a [`PageError`] wrapping [`ClinikitError::Forbidden`] when access
/// is denied, [`ClinikitError::NotFound`] when the module is not installed,
/// or a storage error from the role store.
#[tracing::instrument(skip(state, roles), fields(module_id = %route.module_id, page = ?route.page))]
pub async fn render<R>(
    state: AppState<R>,
    roles: RoleIds,
    route: ModuleRoute,
) -> Result<ModulePageTemplate, PageError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    let module = state.modules.get(&route.module_id).ok_or_else(|| {
        ClinikitError::from(NotFoundError {
            entity: "Module",
            id: route.module_id.clone(),
        })
    })?;

    if !module.user_permitted(roles.as_deref()).await? {
        tracing::debug!("module page denied");
        return Err(ClinikitError::from(ForbiddenError::Module {
            module_id: route.module_id,
        })
        .into());
    }

    Ok(ModulePageTemplate {
        root_path: module.root_path(),
        page: module.render_page(route.page),
    })
}
