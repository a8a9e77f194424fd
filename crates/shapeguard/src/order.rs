//! The order request shape.
//!
//! Every field carries a serde default, so an absent field decodes to its
//! zero value and is left for the structural validator to judge.

use serde::{Deserialize, Serialize};
use shapeguard_schema::record;

use crate::request::{RequestError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

record!(OrderItem {
    product_id: i64,
    quantity: i64,
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderBody {
    pub items: Vec<OrderItem>,
}

record!(OrderBody {
    #[required] items: Vec<OrderItem>,
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderRequest {
    pub order: OrderBody,
}

record!(OrderRequest {
    #[required] order: OrderBody,
});

/// What an accepted order amounts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub item_count: usize,
    pub total_quantity: i64,
    pub items: Vec<OrderItem>,
}

impl OrderSummary {
    /// Summarise a validated order.
    ///
    /// Fails when the total quantity does not fit in an `i64`.
    pub fn from_request(request: OrderRequest) -> Result<Self> {
        let items = request.order.items;
        let total_quantity = items
            .iter()
            .try_fold(0i64, |total, item| total.checked_add(item.quantity))
            .ok_or_else(|| RequestError::processing("order", "total quantity overflows"))?;

        Ok(Self {
            item_count: items.len(),
            total_quantity,
            items,
        })
    }
}
