//! Cart route handlers.
//!
//! All cart routes require a logged-in user; the cart owner always comes
//! from the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use rinkside_core::{Cents, ItemId};

use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Cart, CurrentUser};
use crate::services::cart::{CartError, CartService, parse_quantity};
use crate::services::orders::OrderService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
///
/// The quantity arrives as a raw string and is validated before any
/// database work happens.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(rename = "itemId")]
    pub item_id: i32,
    pub quantity: String,
    pub size: Option<String>,
}

/// Complete purchase form data.
#[derive(Debug, Deserialize)]
pub struct CompletePurchaseForm {
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// A cart line for display, with the image refreshed from the catalog.
#[derive(Clone)]
pub struct CartLineView {
    pub item_id: i32,
    pub name: String,
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: Cents,
    pub line_total: Cents,
    pub image: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    /// Logged-in user (always present on this page).
    pub user: Option<CurrentUser>,
    /// Cart lines in insertion order.
    pub lines: Vec<CartLineView>,
    /// Sum of all line totals.
    pub total: Cents,
    /// Inline validation message from a failed cart action.
    pub error: Option<String>,
}

/// Build the cart page for a user, optionally carrying an error message.
///
/// Prices come from the stored snapshot, but images are refreshed from
/// the live catalog so a swapped product photo shows up immediately.
async fn cart_page(
    state: &AppState,
    user: CurrentUser,
    error: Option<String>,
) -> Result<CartTemplate> {
    let cart = CartService::new(state.pool()).get_or_create(user.id).await?;

    let catalog = CatalogRepository::new(state.pool());
    let mut lines = Vec::with_capacity(cart.lines.len());
    for line in &cart.lines {
        let image = match catalog.get_item(line.id).await? {
            Some(item) => item.image,
            None => line.image.clone(),
        };

        lines.push(CartLineView {
            item_id: line.id.into(),
            name: line.name.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            unit_price: line.price_in_cents,
            line_total: line.line_total(),
            image,
        });
    }

    Ok(CartTemplate {
        user: Some(user),
        lines,
        total: cart.total(),
        error,
    })
}

/// Re-render the cart page with a validation error and matching status.
async fn cart_page_with_error(
    state: &AppState,
    user: CurrentUser,
    err: CartError,
) -> Result<Response> {
    let status = match &err {
        CartError::ItemNotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    let message = AppError::from(err).user_message();
    let page = cart_page(state, user, Some(message)).await?;

    Ok((status, page).into_response())
}

// =============================================================================
// Routes
// =============================================================================

/// Display the cart page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<CartTemplate> {
    cart_page(&state, user, None).await
}

/// Handle add to cart form submission.
///
/// Validates the quantity, snapshots the item from the catalog, merges
/// it into the cart, and redirects to the cart page. Validation
/// failures re-render the cart view with an inline error.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let quantity = match parse_quantity(&form.quantity) {
        Ok(quantity) => quantity,
        Err(e) => return cart_page_with_error(&state, user, e).await,
    };

    let Some(item) = CatalogRepository::new(state.pool())
        .get_item(ItemId::from(form.item_id))
        .await?
    else {
        return cart_page_with_error(&state, user, CartError::ItemNotFound).await;
    };

    // An empty size select submits "", which means no size was chosen.
    let size = form.size.filter(|s| !s.trim().is_empty());

    CartService::new(state.pool())
        .add_item(user.id, &item, quantity, size)
        .await?;

    add_breadcrumb(
        "cart",
        "Added item to cart",
        Some(&[
            ("item_id", &form.item_id.to_string()),
            ("quantity", &quantity.to_string()),
        ]),
    );

    Ok(Redirect::to("/cart").into_response())
}

/// Handle clear cart form submission.
#[instrument(skip_all)]
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response> {
    CartService::new(state.pool()).clear(user.id).await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Handle complete purchase form submission.
///
/// Records the order from the current cart and empties it. Purchasing
/// an empty cart is a no-op that lands back on the cart page.
#[instrument(skip_all)]
pub async fn complete_purchase(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<CompletePurchaseForm>,
) -> Result<Response> {
    let cart: Cart = CartService::new(state.pool()).get_or_create(user.id).await?;

    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let order = OrderService::new(state.pool())
        .complete_order(user.id, &cart, &form.payment_method, &form.transaction_id)
        .await?;

    tracing::info!(
        order_id = %order.id,
        total = %order.total,
        "purchase completed"
    );
    add_breadcrumb(
        "checkout",
        "Completed purchase",
        Some(&[("order_id", &order.id.to_string())]),
    );

    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rinkside_core::{Email, UserId};

    fn cart_template(error: Option<String>) -> CartTemplate {
        CartTemplate {
            user: Some(CurrentUser {
                id: UserId::new(1),
                email: Email::parse("goalie@example.com").unwrap(),
            }),
            lines: Vec::new(),
            total: Cents::ZERO,
            error,
        }
    }

    #[test]
    fn test_cart_page_renders_validation_error_inline() {
        // A rejected quantity lands back on the cart page, not a bare
        // text response.
        let message = AppError::Cart(CartError::InvalidQuantity).user_message();
        let html = cart_template(Some(message.clone())).render().unwrap();

        assert!(html.contains(&message));
        assert!(html.contains("Your cart"));
    }

    #[test]
    fn test_cart_page_renders_missing_item_error_inline() {
        let message = AppError::Cart(CartError::ItemNotFound).user_message();
        let html = cart_template(Some(message.clone())).render().unwrap();

        assert!(html.contains(&message));
    }

    #[test]
    fn test_cart_page_omits_error_block_when_clean() {
        let html = cart_template(None).render().unwrap();
        assert!(!html.contains("form-error"));
    }
}
