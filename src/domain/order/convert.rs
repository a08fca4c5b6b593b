//! Conversion: OrderData → Order (TryFrom + validation).

use super::wire;
use super::{Order, OrderValidationError};
use rust_decimal::Decimal;

impl TryFrom<wire::OrderData> for Order {
    type Error = OrderValidationError;

    fn try_from(source: wire::OrderData) -> Result<Self, Self::Error> {
        if source.id.as_str().trim().is_empty() {
            return Err(OrderValidationError::MissingId);
        }
        for (field, value) in [
            ("unit price", source.unit_price),
            ("fiat price", source.fiat_price),
        ] {
            if value < Decimal::ZERO {
                return Err(OrderValidationError::Negative {
                    id: source.id.clone(),
                    field,
                    value,
                });
            }
        }

        let payment_proof = source
            .payment_proof
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Order {
            id: source.id,
            unit_price: source.unit_price,
            currency: source.currency,
            fiat_currency: source.fiat_currency,
            fiat_price: source.fiat_price,
            payment_method: source.payment_method,
            counterparty_address: source.counterparty_address,
            status: source.status,
            payment_proof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use std::str::FromStr;

    fn parse(json: &str) -> wire::OrderData {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_convert_from_numbers() {
        let data = parse(
            r#"{
                "id": "ord_1",
                "unitPrice": 99,
                "currency": "RUB",
                "fiatCurrency": "RUB",
                "fiatPrice": 4950.5,
                "paymentMethod": "Bank transfer",
                "counterpartyAddress": "PQxuDLBaetWEq9Wcx33VjhRfqtof1o8hDz",
                "status": "pending",
                "paymentProof": ""
            }"#,
        );
        let order = Order::try_from(data).unwrap();
        assert_eq!(order.id.as_str(), "ord_1");
        assert_eq!(order.fiat_price, Decimal::from_str("4950.5").unwrap());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_proof, None);
    }

    #[test]
    fn test_convert_keeps_proof_path() {
        let data = parse(
            r#"{
                "id": "ord_2",
                "unitPrice": "0.11",
                "currency": "USD",
                "fiatCurrency": "USD",
                "fiatPrice": "11.00",
                "paymentMethod": "Card",
                "counterpartyAddress": null,
                "status": "paid",
                "paymentProof": "/uploads/ord_2.png"
            }"#,
        );
        let order = Order::try_from(data).unwrap();
        assert_eq!(order.payment_proof.as_deref(), Some("/uploads/ord_2.png"));
        assert!(order.counterparty_address.is_empty());
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_convert_rejects_negative_price() {
        let data = parse(
            r#"{"id":"ord_3","unitPrice":-1,"currency":"RUB","fiatCurrency":"RUB",
                "fiatPrice":1,"paymentMethod":"Card","status":"pending"}"#,
        );
        assert!(matches!(
            Order::try_from(data),
            Err(OrderValidationError::Negative { field: "unit price", .. })
        ));
    }

    #[test]
    fn test_convert_rejects_empty_id() {
        let data = parse(
            r#"{"id":" ","unitPrice":1,"currency":"RUB","fiatCurrency":"RUB",
                "fiatPrice":1,"paymentMethod":"Card"}"#,
        );
        assert_eq!(Order::try_from(data), Err(OrderValidationError::MissingId));
    }
}
