//! Order working set — the orders currently served by the API.

use super::Order;
use crate::shared::OrderId;
use std::collections::HashMap;

/// Orders currently served by the API, keyed by id.
///
/// Terminal statuses are sticky: an update that would move a paid or
/// canceled order to a different status is ignored.
#[derive(Debug, Clone, Default)]
pub struct ServedOrders {
    orders: HashMap<OrderId, Order>,
}

impl ServedOrders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Orders sorted by id for stable rendering.
    pub fn sorted(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.values().collect();
        orders.sort_by(|a, b| a.id.cmp(&b.id));
        orders
    }

    /// Insert or update one order. Returns `false` if the update was rejected.
    pub fn upsert(&mut self, order: Order) -> bool {
        if let Some(existing) = self.orders.get(&order.id) {
            if !existing.status.can_transition_to(order.status) {
                tracing::warn!(
                    order_id = %order.id,
                    from = %existing.status,
                    to = %order.status,
                    "Ignoring status change out of a terminal state"
                );
                return false;
            }
        }
        self.orders.insert(order.id.clone(), order);
        true
    }

    /// Replace the working set with the served list.
    ///
    /// Returns the ids that are no longer served.
    pub fn sync(&mut self, served: Vec<Order>) -> Vec<OrderId> {
        let served_ids: std::collections::HashSet<OrderId> =
            served.iter().map(|o| o.id.clone()).collect();

        let mut removed: Vec<OrderId> = self
            .orders
            .keys()
            .filter(|id| !served_ids.contains(*id))
            .cloned()
            .collect();
        removed.sort();
        for id in &removed {
            self.orders.remove(id);
        }

        for order in served {
            self.upsert(order);
        }
        removed
    }

    pub fn remove(&mut self, id: &OrderId) -> Option<Order> {
        self.orders.remove(id)
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }
}
