use crate::domain::cart::Cart;
use crate::domain::customer::Customer;
use crate::domain::ports::{
    Availability, CartLookup, CustomerLookup, InventoryService, PaymentAuthorization,
    PaymentService, StockDecrement,
};
use crate::domain::{CartId, CustomerId, ProductId, TransactionId};
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A thread-safe in-memory customer registry.
///
/// Uses `Arc<RwLock<HashMap<..>>>` for shared concurrent access. Ideal for
/// tests and demos where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryCustomers {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
}

impl InMemoryCustomers {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, customer: Customer) {
        let mut customers = self.customers.write().await;
        customers.insert(customer.id, customer);
    }
}

#[async_trait]
impl CustomerLookup for InMemoryCustomers {
    async fn by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id).cloned())
    }
}

/// A thread-safe in-memory cart store keyed by cart id.
///
/// Lookups enforce ownership: a cart held by another customer resolves to
/// `None`.
#[derive(Default, Clone)]
pub struct InMemoryCarts {
    carts: Arc<RwLock<HashMap<CartId, Cart>>>,
}

impl InMemoryCarts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, cart: Cart) {
        let mut carts = self.carts.write().await;
        carts.insert(cart.id, cart);
    }
}

#[async_trait]
impl CartLookup for InMemoryCarts {
    async fn by_id_and_customer(
        &self,
        cart_id: CartId,
        customer: &Customer,
    ) -> Result<Option<Cart>> {
        let carts = self.carts.read().await;
        Ok(carts
            .get(&cart_id)
            .filter(|cart| cart.customer == customer.id)
            .cloned())
    }
}

/// A thread-safe in-memory stock ledger.
///
/// Decrements are all-or-nothing: the whole request is validated against
/// current levels under the write lock before any line is applied.
#[derive(Default, Clone)]
pub struct InMemoryInventory {
    stock: Arc<RwLock<HashMap<ProductId, u32>>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(levels: impl IntoIterator<Item = (ProductId, u32)>) -> Self {
        Self {
            stock: Arc::new(RwLock::new(levels.into_iter().collect())),
        }
    }

    pub async fn set_stock(&self, product_id: ProductId, level: u32) {
        let mut stock = self.stock.write().await;
        stock.insert(product_id, level);
    }

    pub async fn stock_of(&self, product_id: ProductId) -> u32 {
        let stock = self.stock.read().await;
        stock.get(&product_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl InventoryService for InMemoryInventory {
    async fn check_availability(
        &self,
        product_ids: &[ProductId],
        quantities: &[u32],
    ) -> Result<Availability> {
        let stock = self.stock.read().await;
        let mut unavailable = Vec::new();
        for (product_id, quantity) in product_ids.iter().zip(quantities) {
            if stock.get(product_id).copied().unwrap_or(0) < *quantity {
                unavailable.push(*product_id);
            }
        }
        Ok(Availability {
            available: unavailable.is_empty(),
            unavailable,
        })
    }

    async fn decrement(
        &self,
        product_ids: &[ProductId],
        quantities: &[u32],
    ) -> Result<StockDecrement> {
        let mut stock = self.stock.write().await;
        for (product_id, quantity) in product_ids.iter().zip(quantities) {
            if stock.get(product_id).copied().unwrap_or(0) < *quantity {
                return Ok(StockDecrement { success: false });
            }
        }
        for (product_id, quantity) in product_ids.iter().zip(quantities) {
            if let Some(level) = stock.get_mut(product_id) {
                *level -= quantity;
            }
        }
        Ok(StockDecrement { success: true })
    }
}

/// A deterministic in-memory payment processor.
///
/// Issues sequential transaction ids and authorizes every request, unless
/// constructed with a limit that declines larger amounts. Authorized
/// transactions stay recorded until cancelled; cancelling an unknown or
/// already-cancelled transaction is a no-op.
#[derive(Default, Clone)]
pub struct InMemoryPayments {
    authorized: Arc<RwLock<HashMap<TransactionId, CustomerId>>>,
    next_transaction: Arc<AtomicU64>,
    limit: Option<Decimal>,
}

impl InMemoryPayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declines any authorization above `limit`.
    pub fn with_limit(limit: Decimal) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub async fn is_authorized(&self, transaction_id: TransactionId) -> bool {
        let authorized = self.authorized.read().await;
        authorized.contains_key(&transaction_id)
    }
}

#[async_trait]
impl PaymentService for InMemoryPayments {
    async fn authorize(
        &self,
        customer_id: CustomerId,
        amount: Decimal,
    ) -> Result<PaymentAuthorization> {
        if self.limit.is_some_and(|limit| amount > limit) {
            return Ok(PaymentAuthorization {
                authorized: false,
                transaction_id: None,
            });
        }

        let transaction_id = self.next_transaction.fetch_add(1, Ordering::Relaxed) + 1;
        let mut authorized = self.authorized.write().await;
        authorized.insert(transaction_id, customer_id);
        Ok(PaymentAuthorization {
            authorized: true,
            transaction_id: Some(transaction_id),
        })
    }

    async fn cancel(&self, _customer_id: CustomerId, transaction_id: TransactionId) -> Result<()> {
        let mut authorized = self.authorized.write().await;
        authorized.remove(&transaction_id);
        Ok(())
    }
}
