use super::cart::Cart;
use super::customer::Customer;
use super::{CartId, CustomerId, ProductId, TransactionId};
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Resolves customers by id.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn by_id(&self, id: CustomerId) -> Result<Option<Customer>>;
}

/// Resolves carts by id, scoped to their owning customer. A cart that exists
/// but belongs to someone else resolves to `None`.
#[async_trait]
pub trait CartLookup: Send + Sync {
    async fn by_id_and_customer(
        &self,
        cart_id: CartId,
        customer: &Customer,
    ) -> Result<Option<Cart>>;
}

/// Availability report for a stock request.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Availability {
    pub available: bool,
    /// Products the request could not be satisfied for. Empty iff available.
    pub unavailable: Vec<ProductId>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct StockDecrement {
    pub success: bool,
}

/// External inventory. `product_ids` and `quantities` are parallel lists in
/// cart line order.
#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn check_availability(
        &self,
        product_ids: &[ProductId],
        quantities: &[u32],
    ) -> Result<Availability>;

    async fn decrement(
        &self,
        product_ids: &[ProductId],
        quantities: &[u32],
    ) -> Result<StockDecrement>;
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct PaymentAuthorization {
    pub authorized: bool,
    /// Present iff the payment was authorized.
    pub transaction_id: Option<TransactionId>,
}

/// External payment processor.
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn authorize(
        &self,
        customer_id: CustomerId,
        amount: Decimal,
    ) -> Result<PaymentAuthorization>;

    /// Cancels a previously authorized payment. Cancelling an unknown or
    /// already-cancelled transaction must be a no-op.
    async fn cancel(&self, customer_id: CustomerId, transaction_id: TransactionId) -> Result<()>;
}

pub type CustomerLookupBox = Box<dyn CustomerLookup>;
pub type CartLookupBox = Box<dyn CartLookup>;
pub type InventoryServiceBox = Box<dyn InventoryService>;
pub type PaymentServiceBox = Box<dyn PaymentService>;
