//! Payment step state — one locked entry per order.
//!
//! The outer map lock is held only to find or create an entry; all reads and
//! writes of an entry go through that entry's own mutex. Operations on one
//! order are serialized, operations on different orders run in parallel.

use super::{Amounts, AttachedProof, PaymentEntry, PaymentStep, ProofFile};
use crate::error::{PaymentError, SdkError};
use crate::shared::pricing::fiat_for_pkoin;
use crate::shared::OrderId;

use async_lock::{Mutex, RwLock};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

type Slot = Arc<Mutex<PaymentEntry>>;

/// Payment workflow state for every order the buyer has started paying.
#[derive(Debug)]
pub struct PaymentSteps {
    entries: RwLock<HashMap<OrderId, Slot>>,
}

impl Default for PaymentSteps {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentSteps {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    async fn slot(&self, order_id: &OrderId) -> Option<Slot> {
        self.entries.read().await.get(order_id).cloned()
    }

    async fn slot_or_start(&self, order_id: &OrderId) -> Slot {
        if let Some(slot) = self.slot(order_id).await {
            return slot;
        }
        self.entries
            .write()
            .await
            .entry(order_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(PaymentEntry::started())))
            .clone()
    }

    async fn started_slot(&self, order_id: &OrderId) -> Result<Slot, PaymentError> {
        self.slot(order_id)
            .await
            .ok_or_else(|| PaymentError::NotStarted(order_id.clone()))
    }

    /// Start the payment workflow at step 1. No-op if already started.
    pub async fn init_buy(&self, order_id: &OrderId) -> PaymentStep {
        let slot = self.slot_or_start(order_id).await;
        let step = slot.lock().await.step;
        tracing::debug!(order_id = %order_id, step = %step, "Buy initialized");
        step
    }

    /// Advance to the next step, starting at step 1 if the order was never
    /// initialized.
    pub async fn next_step(&self, order_id: &OrderId) -> Result<PaymentStep, PaymentError> {
        let slot = self.slot_or_start(order_id).await;
        let mut entry = slot.lock().await;
        if entry.step.is_confirmed() {
            return Err(PaymentError::AlreadyConfirmed(order_id.clone()));
        }
        let next = entry.step.next().ok_or_else(|| PaymentError::NoNextStep {
            order_id: order_id.clone(),
            step: entry.step,
        })?;
        entry.step = next;
        tracing::debug!(order_id = %order_id, step = %next, "Payment step advanced");
        Ok(next)
    }

    /// Current step, `None` if the workflow was never started.
    pub async fn step(&self, order_id: &OrderId) -> Option<PaymentStep> {
        match self.slot(order_id).await {
            Some(slot) => Some(slot.lock().await.step),
            None => None,
        }
    }

    /// Copy of the full entry for an order.
    pub async fn snapshot(&self, order_id: &OrderId) -> Option<PaymentEntry> {
        match self.slot(order_id).await {
            Some(slot) => Some(slot.lock().await.clone()),
            None => None,
        }
    }

    /// Record the amounts the buyer entered.
    pub async fn set_amounts(
        &self,
        order_id: &OrderId,
        amounts: Amounts,
    ) -> Result<(), PaymentError> {
        let slot = self.started_slot(order_id).await?;
        let mut entry = slot.lock().await;
        if entry.step.is_confirmed() {
            return Err(PaymentError::AlreadyConfirmed(order_id.clone()));
        }
        entry.amounts = Some(amounts);
        Ok(())
    }

    /// Record `pkoin` together with its fiat value at `unit_price`.
    pub async fn quote_amounts(
        &self,
        order_id: &OrderId,
        pkoin: Decimal,
        unit_price: Decimal,
    ) -> Result<Amounts, PaymentError> {
        let amounts = Amounts {
            pkoin,
            fiat: fiat_for_pkoin(pkoin, unit_price),
        };
        self.set_amounts(order_id, amounts).await?;
        Ok(amounts)
    }

    /// Attach a proof of payment, replacing any earlier one.
    ///
    /// `None` (no file selected) leaves the state untouched and returns
    /// `Ok(false)`.
    pub async fn attach_proof(
        &self,
        order_id: &OrderId,
        file: Option<ProofFile>,
    ) -> Result<bool, PaymentError> {
        let Some(file) = file else {
            return Ok(false);
        };
        let slot = self.started_slot(order_id).await?;
        let mut entry = slot.lock().await;
        if entry.step.is_confirmed() {
            return Err(PaymentError::AlreadyConfirmed(order_id.clone()));
        }
        tracing::debug!(order_id = %order_id, file = %file.file_name, "Proof attached");
        entry.proof = Some(AttachedProof {
            file,
            attached_at: Utc::now(),
        });
        Ok(true)
    }

    /// Run `send` with the order's entry locked and mark the order confirmed
    /// if it succeeds.
    ///
    /// The lock is held across `send`, so a concurrent confirmation of the
    /// same order waits and then fails with `AlreadyConfirmed`. On error the
    /// entry is left unchanged.
    pub async fn confirm_with<T, F, Fut>(&self, order_id: &OrderId, send: F) -> Result<T, SdkError>
    where
        F: FnOnce(PaymentEntry) -> Fut,
        Fut: Future<Output = Result<T, SdkError>>,
    {
        let slot = self.started_slot(order_id).await?;
        let mut entry = slot.lock().await;
        if entry.step.is_confirmed() {
            return Err(PaymentError::AlreadyConfirmed(order_id.clone()).into());
        }
        let out = send((*entry).clone()).await?;
        entry.step = PaymentStep::Confirmed;
        Ok(out)
    }

    /// Drop the entry of an order that left the working set.
    pub async fn discard(&self, order_id: &OrderId) -> bool {
        self.entries.write().await.remove(order_id).is_some()
    }

    /// Keep only entries whose order id satisfies `keep`. Returns the dropped ids.
    pub async fn retain<F>(&self, keep: F) -> Vec<OrderId>
    where
        F: Fn(&OrderId) -> bool,
    {
        let mut entries = self.entries.write().await;
        let mut dropped: Vec<OrderId> = entries.keys().filter(|id| !keep(*id)).cloned().collect();
        dropped.sort();
        for id in &dropped {
            entries.remove(id);
        }
        dropped
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
