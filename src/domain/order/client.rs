//! Orders sub-client — served list, single fetch, cancel, working-set sync.

use crate::client::P2pClient;
use crate::domain::order::wire::OrderData;
use crate::domain::order::{Order, OrderValidationError, OrderView};
use crate::error::SdkError;
use crate::shared::OrderId;

/// Sub-client for order operations.
pub struct Orders<'a> {
    pub(crate) client: &'a P2pClient,
}

fn order_path(order_id: &OrderId) -> String {
    format!("/orders/{}", urlencoding::encode(order_id.as_str()))
}

fn convert(data: OrderData) -> Result<Order, SdkError> {
    Order::try_from(data).map_err(|e: OrderValidationError| SdkError::Validation(e.to_string()))
}

impl<'a> Orders<'a> {
    /// Orders currently served by the API.
    pub async fn list(&self) -> Result<Vec<Order>, SdkError> {
        let data: Vec<OrderData> = self.client.http.get("/orders").await?;
        data.into_iter().map(convert).collect()
    }

    pub async fn get(&self, order_id: &OrderId) -> Result<Order, SdkError> {
        let data: OrderData = self.client.http.get(&order_path(order_id)).await?;
        let order = convert(data)?;
        self.client.served.write().await.upsert(order.clone());
        Ok(order)
    }

    /// Cancel a pending order. The API answers with the updated order.
    pub async fn cancel(&self, order_id: &OrderId) -> Result<Order, SdkError> {
        let path = format!("{}/cancel", order_path(order_id));
        let data: OrderData = self
            .client
            .http
            .post(&path, &serde_json::json!({}))
            .await?;
        let order = convert(data)?;
        self.client.served.write().await.upsert(order.clone());
        Ok(order)
    }

    /// Reload the served list into the working set.
    ///
    /// Orders no longer served are dropped together with their payment
    /// entries. Returns the removed ids.
    pub async fn refresh(&self) -> Result<Vec<OrderId>, SdkError> {
        let served = self.list().await?;
        let removed = self.client.served.write().await.sync(served);
        for order_id in &removed {
            if self.client.payments.discard(order_id).await {
                tracing::warn!(order_id = %order_id, "Discarded payment entry of an order no longer served");
            }
        }
        Ok(removed)
    }

    /// Snapshot of the working set, sorted by id.
    pub async fn served(&self) -> Vec<Order> {
        self.client
            .served
            .read()
            .await
            .sorted()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Render rows for the working set, including each order's payment step.
    pub async fn views(&self) -> Vec<OrderView> {
        let orders = self.served().await;
        let mut views = Vec::with_capacity(orders.len());
        for order in &orders {
            let step = self.client.payments.step(&order.id).await;
            views.push(OrderView::new(order, step));
        }
        views
    }

    /// Absolute URL of the uploaded proof, if any.
    pub fn proof_url(&self, order: &Order) -> Option<String> {
        order
            .payment_proof
            .as_deref()
            .map(|path| self.client.http.url(path))
    }
}
