//! # Command Channel
//!
//! JSON-lines transport between the storefront UI and the register.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin  (one request per line)                                         │
//! │  {"command":"add_back_order_item",                                      │
//! │   "args":{"productId":"BW-001","quantity":2}}                           │
//! │                                                                         │
//! │  stdout (one response per line, same order)                            │
//! │  {"ok":true,"data":{"cart":{...},"outcome":{"status":"applied"}}}       │
//! │  {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands without arguments may omit `args`. Requests are handled one at
//! a time in arrival order, so responses never interleave.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};
use wpos_core::{CatalogFilter, DiscountKind};

use crate::commands;
use crate::error::ApiError;
use crate::Register;

/// One UI request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "command",
    content = "args",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    GetConfig,
    SearchCatalog {
        #[serde(default)]
        filter: CatalogFilter,
        #[serde(default)]
        page: Option<usize>,
    },
    ReloadCatalog,
    GetCart,
    AddToCart {
        product_id: String,
    },
    RemoveFromCart {
        product_id: String,
    },
    UpdateCartItem {
        product_id: String,
        quantity: i64,
    },
    IncrementCartItem {
        product_id: String,
    },
    DecrementCartItem {
        product_id: String,
    },
    AddBackOrderItem {
        product_id: String,
        quantity: i64,
    },
    RemoveBackOrderItem {
        product_id: String,
    },
    UpdateBackOrderItem {
        product_id: String,
        quantity: i64,
    },
    UpdateDiscount {
        product_id: String,
        /// Raw text of the discount box
        amount: String,
        #[serde(rename = "type")]
        kind: DiscountKind,
    },
    GetDiscount {
        product_id: String,
    },
    ClearCart,
    GetStockStatus {
        product_id: String,
    },
    GetSummary,
    SetBillDiscount {
        value: String,
        #[serde(rename = "type")]
        kind: DiscountKind,
    },
}

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Routes a request to its command.
pub async fn handle(register: &Register, request: Request) -> Result<Value, ApiError> {
    let catalog = register.catalog();
    let cart = register.cart();
    let config = register.config();

    match request {
        Request::GetConfig => to_data(commands::config::get_config(config, cart)),
        Request::SearchCatalog { filter, page } => to_data(commands::catalog::search_catalog(
            catalog, cart, config, filter, page,
        )?),
        Request::ReloadCatalog => to_data(commands::catalog::reload_catalog(catalog, config).await?),
        Request::GetCart => to_data(commands::cart::get_cart(cart)),
        Request::AddToCart { product_id } => {
            to_data(commands::cart::add_to_cart(catalog, cart, product_id)?)
        }
        Request::RemoveFromCart { product_id } => {
            to_data(commands::cart::remove_from_cart(cart, product_id))
        }
        Request::UpdateCartItem {
            product_id,
            quantity,
        } => to_data(commands::cart::update_cart_item(cart, product_id, quantity)),
        Request::IncrementCartItem { product_id } => {
            to_data(commands::cart::increment_cart_item(cart, product_id))
        }
        Request::DecrementCartItem { product_id } => {
            to_data(commands::cart::decrement_cart_item(cart, product_id))
        }
        Request::AddBackOrderItem {
            product_id,
            quantity,
        } => to_data(commands::cart::add_back_order_item(
            catalog, cart, product_id, quantity,
        )?),
        Request::RemoveBackOrderItem { product_id } => {
            to_data(commands::cart::remove_back_order_item(cart, product_id))
        }
        Request::UpdateBackOrderItem {
            product_id,
            quantity,
        } => to_data(commands::cart::update_back_order_item(
            cart, product_id, quantity,
        )),
        Request::UpdateDiscount {
            product_id,
            amount,
            kind,
        } => to_data(commands::cart::update_discount(
            cart, product_id, amount, kind,
        )),
        Request::GetDiscount { product_id } => {
            to_data(commands::cart::get_discount(cart, product_id))
        }
        Request::ClearCart => to_data(commands::cart::clear_cart(cart)),
        Request::GetStockStatus { product_id } => {
            to_data(commands::cart::get_stock_status(catalog, cart, product_id)?)
        }
        Request::GetSummary => to_data(commands::summary::get_summary(cart, config)),
        Request::SetBillDiscount { value, kind } => {
            to_data(commands::summary::set_bill_discount(cart, value, kind))
        }
    }
}

/// Handles one request line and renders the response envelope.
pub async fn handle_line(register: &Register, line: &str) -> String {
    let result = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(register, request).await,
        Err(e) => {
            warn!(error = %e, "Malformed request");
            Err(ApiError::invalid_request(e.to_string()))
        }
    };

    let envelope = match result {
        Ok(data) => json!({ "ok": true, "data": data }),
        Err(error) => json!({ "ok": false, "error": error }),
    };
    envelope.to_string()
}

/// Serves requests until the reader reaches end of input.
pub async fn serve<R, W>(register: &Register, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(register, line).await;
        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    debug!("Command channel closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use wpos_core::{Money, Product};

    fn register() -> Register {
        Register::new(
            ConfigState::default(),
            vec![
                Product::new("BW-001", "Vitamin C", Money::from_baht(100), 5),
                Product::new("BW-002", "Sunscreen", Money::from_baht(350), 2),
            ],
        )
    }

    async fn call(register: &Register, line: &str) -> Value {
        serde_json::from_str(&handle_line(register, line).await).unwrap()
    }

    #[test]
    fn test_request_decoding() {
        let request: Request =
            serde_json::from_str(r#"{"command":"get_cart"}"#).unwrap();
        assert_eq!(request, Request::GetCart);

        let request: Request = serde_json::from_str(
            r#"{"command":"update_discount","args":{"productId":"BW-001","amount":"10","type":"percent"}}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::UpdateDiscount {
                product_id: "BW-001".to_string(),
                amount: "10".to_string(),
                kind: DiscountKind::Percent,
            }
        );
    }

    #[tokio::test]
    async fn test_cart_round_through_channel() {
        let register = register();

        let response = call(
            &register,
            r#"{"command":"add_to_cart","args":{"productId":"BW-001"}}"#,
        )
        .await;
        assert_eq!(response["ok"], true);
        assert_eq!(response["data"]["outcome"]["status"], "applied");

        let response = call(
            &register,
            r#"{"command":"add_back_order_item","args":{"productId":"BW-001","quantity":9}}"#,
        )
        .await;
        assert_eq!(response["data"]["outcome"]["status"], "clamped");
        assert_eq!(response["data"]["outcome"]["granted"], 4);

        let response = call(&register, r#"{"command":"get_summary"}"#).await;
        assert_eq!(response["data"]["display"]["grandTotal"], "฿507.00");
    }

    #[tokio::test]
    async fn test_errors_use_envelope() {
        let register = register();

        let response = call(
            &register,
            r#"{"command":"add_to_cart","args":{"productId":"BW-404"}}"#,
        )
        .await;
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["code"], "NOT_FOUND");

        let response = call(&register, r#"{"command":"sell_everything"}"#).await;
        assert_eq!(response["error"]["code"], "INVALID_REQUEST");

        let response = call(&register, "not json").await;
        assert_eq!(response["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_serve_answers_each_line() {
        let register = register();
        let input = concat!(
            r#"{"command":"add_to_cart","args":{"productId":"BW-002"}}"#,
            "\n\n",
            r#"{"command":"get_stock_status","args":{"productId":"BW-002"}}"#,
            "\n",
        );
        let mut output = Vec::new();

        serve(&register, input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1]["data"]["available"], 1);
    }
}
