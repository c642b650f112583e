//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use rinkside_core::Cents;

use crate::db::catalog::CatalogRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, EquipmentItem};
use crate::state::AppState;

/// Equipment display data for templates.
#[derive(Clone)]
pub struct ItemView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Cents,
    pub image: String,
    pub sizes: Vec<String>,
}

impl From<EquipmentItem> for ItemView {
    fn from(item: EquipmentItem) -> Self {
        Self {
            id: item.id.into(),
            name: item.name,
            description: item.description,
            price: item.price,
            image: item.image,
            sizes: item.sizes.unwrap_or_default(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Logged-in user, if any.
    pub user: Option<CurrentUser>,
    /// Full equipment catalog.
    pub items: Vec<ItemView>,
}

/// Display the home page with the full equipment catalog.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<IndexTemplate> {
    let items = CatalogRepository::new(state.pool())
        .list_items()
        .await?
        .into_iter()
        .map(ItemView::from)
        .collect();

    Ok(IndexTemplate { user, items })
}
