//! Order identifiers and the order creation payload.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Identifier of an order, as carried in the `{orderId}` path segment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i32);

impl OrderId {
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for OrderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("OrderId: {e}")))
    }
}

/// Payload for order creation.
///
/// The attribute set is owned by whoever implements order handling; at this
/// layer the model is an opaque JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderModel(Map<String, Value>);

impl OrderModel {
    /// Decode a model from a JSON request body. The body must be a JSON object.
    pub fn from_json(body: &[u8]) -> DomainResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| DomainError::validation(format!("order body: {e}")))
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn order_id_rejects_non_numeric_segment() {
        let err = "abc".parse::<OrderId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("OrderId")));
    }

    #[test]
    fn order_id_rejects_out_of_range_segment() {
        assert!("2147483648".parse::<OrderId>().is_err());
    }

    #[test]
    fn order_model_keeps_opaque_attributes() {
        let model = OrderModel::from_json(br#"{"sku":"A-1","quantity":3}"#).unwrap();
        assert_eq!(model.attribute("sku"), Some(&Value::from("A-1")));
        assert_eq!(model.attribute("quantity"), Some(&Value::from(3)));
        assert!(model.attribute("missing").is_none());
    }

    #[test]
    fn order_model_requires_a_json_object() {
        assert!(OrderModel::from_json(b"[1,2,3]").is_err());
        assert!(OrderModel::from_json(b"not json").is_err());
        assert!(OrderModel::from_json(b"").is_err());
    }

    proptest! {
        #[test]
        fn order_id_parses_any_i32(n in any::<i32>()) {
            let id: OrderId = n.to_string().parse().unwrap();
            prop_assert_eq!(id.get(), n);
        }
    }
}
