//! # Cart Commands
//!
//! Commands for the regular pool, the back-order pool and line discounts.
//!
//! ## Rejections Are Not Errors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart("BW-001")  at stock ceiling                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Ok(CartResponse { cart: unchanged, outcome: ignored/stockExhausted }) │
//! │                                                                         │
//! │  add_to_cart("BW-404")  not in catalog                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Err(ApiError { code: NOT_FOUND })                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Only an unknown product id is an error. Stock ceilings and missing lines
//! come back as a [`CommandOutcome`] next to the unchanged cart, which the
//! UI uses to keep buttons disabled.

use serde::Serialize;
use tracing::{debug, info};
use wpos_core::validation::parse_hundredths;
use wpos_core::{CartCommand, CartState, CommandOutcome, Discount, DiscountKind, DiscountRequest};

use crate::error::ApiError;
use crate::state::{CartSession, CatalogState};

/// Cart response including the outcome of the command that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart: CartState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CommandOutcome>,
}

/// How much of a product is still free across both pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStatus {
    pub product_id: String,
    pub stock: i64,
    pub regular_quantity: i64,
    pub back_order_quantity: i64,
    /// Regular plus back order
    pub total_in_cart: i64,
    pub available: i64,
    pub can_add: bool,
}

fn run(cart: &CartSession, command: CartCommand) -> CartResponse {
    cart.dispatch(command, |state, outcome| {
        match outcome {
            CommandOutcome::Applied => {}
            CommandOutcome::Clamped { requested, granted } => {
                info!(requested, granted, "Request clamped")
            }
            CommandOutcome::Ignored { reason } => debug!(?reason, "Command ignored"),
        }
        CartResponse {
            cart: state.clone(),
            outcome: Some(outcome),
        }
    })
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartSession) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|state| CartResponse {
        cart: state.clone(),
        outcome: None,
    })
}

// =============================================================================
// Regular Pool
// =============================================================================

/// Adds one unit of a catalog product to the regular pool.
///
/// ## Behavior
/// - Price and stock are read from the current catalog snapshot
/// - If already in the cart: quantity + 1 (the line keeps its snapshot)
/// - At the stock ceiling: cart unchanged, outcome `stockExhausted`
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartSession,
    product_id: String,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");
    let product = catalog.find(&product_id)?;
    Ok(run(cart, CartCommand::AddItem { product }))
}

/// Removes a regular line and its discount.
pub fn remove_from_cart(cart: &CartSession, product_id: String) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    run(cart, CartCommand::RemoveItem { id: product_id })
}

/// Sets a regular line's quantity.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the line
/// - Above `stock − back order`: clamped
pub fn update_cart_item(cart: &CartSession, product_id: String, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity, "update_cart_item command");
    run(
        cart,
        CartCommand::UpdateQuantity {
            id: product_id,
            quantity,
        },
    )
}

pub fn increment_cart_item(cart: &CartSession, product_id: String) -> CartResponse {
    debug!(product_id = %product_id, "increment_cart_item command");
    run(cart, CartCommand::IncrementItem { id: product_id })
}

pub fn decrement_cart_item(cart: &CartSession, product_id: String) -> CartResponse {
    debug!(product_id = %product_id, "decrement_cart_item command");
    run(cart, CartCommand::DecrementItem { id: product_id })
}

// =============================================================================
// Back-order Pool
// =============================================================================

/// Adds up to `quantity` units of a catalog product to the back-order pool.
pub fn add_back_order_item(
    catalog: &CatalogState,
    cart: &CartSession,
    product_id: String,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity, "add_back_order_item command");
    let product = catalog.find(&product_id)?;
    Ok(run(cart, CartCommand::AddBackOrderItem { product, quantity }))
}

pub fn remove_back_order_item(cart: &CartSession, product_id: String) -> CartResponse {
    debug!(product_id = %product_id, "remove_back_order_item command");
    run(cart, CartCommand::RemoveBackOrderItem { id: product_id })
}

/// Sets a back-order line's quantity; ≤ 0 removes it.
pub fn update_back_order_item(cart: &CartSession, product_id: String, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity, "update_back_order_item command");
    run(
        cart,
        CartCommand::UpdateBackOrderQuantity {
            id: product_id,
            quantity,
        },
    )
}

// =============================================================================
// Discounts & Queries
// =============================================================================

/// Sets a regular line's discount from the text in its discount box.
///
/// Text that is not a number counts as zero, which deletes the discount.
/// The typed figure goes to the cart unbounded, so `150` percent comes back
/// as `clamped` with `granted: 10000`.
pub fn update_discount(
    cart: &CartSession,
    product_id: String,
    amount: String,
    kind: DiscountKind,
) -> CartResponse {
    debug!(product_id = %product_id, amount = %amount, %kind, "update_discount command");
    let hundredths = parse_hundredths("discount", &amount).unwrap_or(0);
    run(
        cart,
        CartCommand::UpdateDiscount {
            id: product_id,
            discount: DiscountRequest::new(kind, hundredths),
        },
    )
}

pub fn get_discount(cart: &CartSession, product_id: String) -> Option<Discount> {
    debug!(product_id = %product_id, "get_discount command");
    cart.with_cart(|state| state.discount(&product_id).copied())
}

/// Empties both pools and all discounts. The bill discount input stays.
pub fn clear_cart(cart: &CartSession) -> CartResponse {
    debug!("clear_cart command");
    run(cart, CartCommand::ClearCart)
}

/// Stock figures for one product against the current cart.
pub fn get_stock_status(
    catalog: &CatalogState,
    cart: &CartSession,
    product_id: String,
) -> Result<StockStatus, ApiError> {
    debug!(product_id = %product_id, "get_stock_status command");
    let product = catalog.find(&product_id)?;
    Ok(cart.with_cart(|state| StockStatus {
        regular_quantity: state.regular_quantity(&product.id),
        back_order_quantity: state.back_order_quantity(&product.id),
        total_in_cart: state.total_across_pools(&product.id),
        available: state.available_stock(&product.id, product.stock),
        can_add: state.can_add(&product.id, product.stock),
        stock: product.stock,
        product_id: product.id.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use wpos_core::{IgnoreReason, Money, Percentage, Product};

    fn catalog() -> CatalogState {
        CatalogState::new(vec![
            Product::new("P1", "Vitamin C", Money::from_baht(100), 5),
            Product::new("P2", "Sold Out Serum", Money::from_baht(990), 0),
        ])
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let err = add_to_cart(&catalog(), &CartSession::new(), "P404".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = get_stock_status(&catalog(), &CartSession::new(), "P404".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_out_of_stock_is_an_outcome() {
        let response = add_to_cart(&catalog(), &CartSession::new(), "P2".to_string()).unwrap();
        assert_eq!(
            response.outcome,
            Some(CommandOutcome::Ignored {
                reason: IgnoreReason::StockExhausted
            })
        );
        assert!(response.cart.is_empty());
    }

    #[test]
    fn test_regular_and_back_order_share_stock() {
        let catalog = catalog();
        let cart = CartSession::new();
        for _ in 0..3 {
            add_to_cart(&catalog, &cart, "P1".to_string()).unwrap();
        }

        let response = add_back_order_item(&catalog, &cart, "P1".to_string(), 5).unwrap();
        assert_eq!(
            response.outcome,
            Some(CommandOutcome::Clamped {
                requested: 5,
                granted: 2
            })
        );

        let status = get_stock_status(&catalog, &cart, "P1".to_string()).unwrap();
        assert_eq!(
            status,
            StockStatus {
                product_id: "P1".to_string(),
                stock: 5,
                regular_quantity: 3,
                back_order_quantity: 2,
                total_in_cart: 5,
                available: 0,
                can_add: false,
            }
        );
    }

    #[test]
    fn test_quantity_commands() {
        let catalog = catalog();
        let cart = CartSession::new();
        add_to_cart(&catalog, &cart, "P1".to_string()).unwrap();

        increment_cart_item(&cart, "P1".to_string());
        assert_eq!(get_cart(&cart).cart.regular_quantity("P1"), 2);

        decrement_cart_item(&cart, "P1".to_string());
        let response = update_cart_item(&cart, "P1".to_string(), 9);
        assert_eq!(response.cart.regular_quantity("P1"), 5);

        add_back_order_item(&catalog, &cart, "P1".to_string(), 1).unwrap();
        assert_eq!(get_cart(&cart).cart.back_order_quantity("P1"), 0);

        update_cart_item(&cart, "P1".to_string(), 4);
        add_back_order_item(&catalog, &cart, "P1".to_string(), 1).unwrap();
        let response = update_back_order_item(&cart, "P1".to_string(), 0);
        assert!(!response.cart.is_in_back_order("P1"));

        let response = remove_from_cart(&cart, "P1".to_string());
        assert!(response.cart.is_empty());
        assert!(get_cart(&cart).outcome.is_none());
    }

    #[test]
    fn test_update_discount_parses_text() {
        let catalog = catalog();
        let cart = CartSession::new();
        for _ in 0..3 {
            add_to_cart(&catalog, &cart, "P1".to_string()).unwrap();
        }

        let response =
            update_discount(&cart, "P1".to_string(), "10".to_string(), DiscountKind::Baht);
        assert_eq!(response.outcome, Some(CommandOutcome::Applied));
        assert_eq!(
            get_discount(&cart, "P1".to_string()),
            Some(Discount::Baht(Money::from_baht(10)))
        );

        let response =
            update_discount(&cart, "P1".to_string(), "150".to_string(), DiscountKind::Percent);
        assert_eq!(
            response.outcome,
            Some(CommandOutcome::Clamped {
                requested: 15_000,
                granted: 10_000
            })
        );
        assert_eq!(
            get_discount(&cart, "P1".to_string()),
            Some(Discount::Percent(Percentage::from_whole(100)))
        );

        // Garbage clears the discount
        update_discount(&cart, "P1".to_string(), "abc".to_string(), DiscountKind::Baht);
        assert_eq!(get_discount(&cart, "P1".to_string()), None);
    }

    #[test]
    fn test_clear_cart() {
        let catalog = catalog();
        let cart = CartSession::new();
        add_to_cart(&catalog, &cart, "P1".to_string()).unwrap();
        add_back_order_item(&catalog, &cart, "P1".to_string(), 2).unwrap();

        let response = clear_cart(&cart);

        assert!(response.cart.is_empty());
        assert_eq!(response.outcome, Some(CommandOutcome::Applied));
    }

    #[test]
    fn test_response_serialization() {
        let response = remove_from_cart(&CartSession::new(), "P1".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json["outcome"],
            serde_json::json!({ "status": "ignored", "reason": "lineNotFound" })
        );
        assert_eq!(json["cart"]["totalItems"], 0);
    }
}
