//! Equipment item detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use rinkside_core::ItemId;

use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::routes::home::ItemView;
use crate::state::AppState;

/// Item detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "item_details.html")]
pub struct ItemDetailsTemplate {
    /// Logged-in user, if any.
    pub user: Option<CurrentUser>,
    /// The item being viewed.
    pub item: ItemView,
}

/// Display a single equipment item.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<i32>,
) -> Result<ItemDetailsTemplate> {
    let item = CatalogRepository::new(state.pool())
        .get_item(ItemId::from(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {id}")))?;

    Ok(ItemDetailsTemplate {
        user,
        item: ItemView::from(item),
    })
}
