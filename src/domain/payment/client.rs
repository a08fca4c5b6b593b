//! Payments sub-client — step workflow commands and payment confirmation.

use rust_decimal::Decimal;

use super::wire::ConfirmPaymentBody;
use super::{Amounts, PaymentEntry, PaymentStep, ProofFile};
use crate::client::P2pClient;
use crate::domain::order::wire::OrderData;
use crate::domain::order::Order;
use crate::error::{PaymentError, SdkError};
use crate::shared::OrderId;

/// Sub-client for the buyer's payment workflow.
pub struct Payments<'a> {
    pub(crate) client: &'a P2pClient,
}

impl<'a> Payments<'a> {
    pub async fn init_buy(&self, order_id: &OrderId) -> PaymentStep {
        self.client.payments.init_buy(order_id).await
    }

    pub async fn next_step(&self, order_id: &OrderId) -> Result<PaymentStep, PaymentError> {
        self.client.payments.next_step(order_id).await
    }

    pub async fn step(&self, order_id: &OrderId) -> Option<PaymentStep> {
        self.client.payments.step(order_id).await
    }

    pub async fn entry(&self, order_id: &OrderId) -> Option<PaymentEntry> {
        self.client.payments.snapshot(order_id).await
    }

    pub async fn set_amounts(&self, order_id: &OrderId, amounts: Amounts) -> Result<(), PaymentError> {
        self.client.payments.set_amounts(order_id, amounts).await
    }

    /// Record `pkoin` and its fiat value at the order's unit price.
    pub async fn quote_amounts(
        &self,
        order: &Order,
        pkoin: Decimal,
    ) -> Result<Amounts, PaymentError> {
        self.client
            .payments
            .quote_amounts(&order.id, pkoin, order.unit_price)
            .await
    }

    pub async fn attach_proof(
        &self,
        order_id: &OrderId,
        file: Option<ProofFile>,
    ) -> Result<bool, PaymentError> {
        self.client.payments.attach_proof(order_id, file).await
    }

    /// Tell the backend the buyer has paid.
    ///
    /// Sends the recorded amounts and proof to `POST /orders/{id}/confirm`.
    /// The step becomes `Confirmed` only if the call succeeds and the returned
    /// order passes validation; that order also refreshes the working set.
    pub async fn confirm_payment(&self, order_id: &OrderId) -> Result<Order, SdkError> {
        let http = &self.client.http;
        let path = format!("/orders/{}/confirm", urlencoding::encode(order_id.as_str()));

        let order = self
            .client
            .payments
            .confirm_with(order_id, move |entry| async move {
                let body = ConfirmPaymentBody::from(&entry);
                let data: OrderData = http.post(&path, &body).await?;
                Order::try_from(data).map_err(|e| SdkError::Validation(e.to_string()))
            })
            .await?;

        tracing::info!(order_id = %order_id, status = %order.status, "Payment confirmed");
        self.client.served.write().await.upsert(order.clone());
        Ok(order)
    }
}
