//! Account route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use rinkside_core::Cents;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Order};
use crate::services::orders::OrderService;
use crate::state::AppState;

/// A purchased line for order history display.
#[derive(Clone)]
pub struct OrderLineView {
    pub name: String,
    pub size: Option<String>,
    pub quantity: u32,
    pub line_total: Cents,
}

/// Order display data for the profile page.
#[derive(Clone)]
pub struct OrderView {
    pub id: i32,
    pub total: Cents,
    pub payment_method: String,
    pub transaction_id: String,
    pub placed_on: String,
    pub lines: Vec<OrderLineView>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let lines = order
            .lines
            .iter()
            .map(|line| OrderLineView {
                name: line.name.clone(),
                size: line.size.clone(),
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect();

        Self {
            id: order.id.into(),
            total: order.total,
            payment_method: order.payment_method,
            transaction_id: order.transaction_id,
            placed_on: order.created_at.format("%B %-d, %Y").to_string(),
            lines,
        }
    }
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    /// Logged-in user (always present on this page).
    pub user: Option<CurrentUser>,
    /// The user's orders, newest first.
    pub orders: Vec<OrderView>,
}

/// Display the profile page with order history.
#[instrument(skip_all)]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<ProfileTemplate> {
    let orders = OrderService::new(state.pool())
        .list_for_user(user.id)
        .await?
        .into_iter()
        .map(OrderView::from)
        .collect();

    Ok(ProfileTemplate {
        user: Some(user),
        orders,
    })
}
