use super::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable product: unit price and unit shipping weight.
///
/// Price and weight are decimals, never binary floats; pricing arithmetic
/// must stay exact.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Product {
    pub id: ProductId,
    pub price: Decimal,
    pub weight: Decimal,
}

impl Product {
    pub fn new(id: ProductId, price: Decimal, weight: Decimal) -> Self {
        Self { id, price, weight }
    }
}
