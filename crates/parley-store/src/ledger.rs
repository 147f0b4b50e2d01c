//! Append-only order ledger mirrored to `orders.json`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use parley_core::error::{ParleyError, Result};
use parley_core::types::{LineItem, Order, OrderItem};

use crate::catalog::Catalog;
use crate::persist_best_effort;

/// In-memory order ledger with best-effort JSON mirroring.
///
/// Orders are appended, never mutated or removed. Every successful creation
/// rewrites the backing file with the full list; a write failure keeps the
/// order valid in memory and never fails the caller.
pub struct OrderLedger {
    orders: Mutex<Vec<Order>>,
    path: PathBuf,
}

impl OrderLedger {
    /// Open the ledger, loading any previously persisted orders.
    /// A missing or corrupt file starts an empty ledger.
    pub fn open(path: PathBuf) -> Self {
        let orders = std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        Self {
            orders: Mutex::new(orders),
            path,
        }
    }

    /// Price and record an order.
    ///
    /// Any line item referencing an unknown product aborts the whole call
    /// with nothing persisted. The order currency is taken from the last
    /// processed line item's product (pinned legacy behavior).
    pub fn create_order(
        &self,
        catalog: &Catalog,
        line_items: &[LineItem],
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Result<Order> {
        let mut items = Vec::with_capacity(line_items.len());
        let mut total = 0.0;
        let mut currency = "INR".to_string();

        for li in line_items {
            let product = catalog.find(&li.product_id).ok_or_else(|| {
                ParleyError::UnknownProduct {
                    product_id: li.product_id.clone(),
                }
            })?;
            let line_total = product.price * f64::from(li.quantity);
            total += line_total;
            currency = product.currency.clone();
            items.push(OrderItem {
                product_id: li.product_id.clone(),
                name: product.name.clone(),
                unit_price: product.price,
                quantity: li.quantity,
                line_total,
                attributes: li.attributes.clone(),
            });
        }

        let order = Order {
            id: Uuid::new_v4().to_string(),
            items,
            total,
            currency,
            created_at: Utc::now(),
            metadata,
        };

        let mut orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
        orders.push(order.clone());
        if !persist_best_effort(&self.path, &*orders) {
            warn!(order_id = %order.id, "order retained in memory only");
        }
        debug!(order_id = %order.id, total = order.total, "order created");
        Ok(order)
    }

    pub fn last_order(&self) -> Option<Order> {
        let orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
        orders.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.orders.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
