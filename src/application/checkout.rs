use crate::domain::pricing;
use crate::domain::ports::{
    CartLookupBox, CustomerLookupBox, InventoryServiceBox, PaymentServiceBox,
};
use crate::domain::{CartId, CustomerId, TransactionId};
use crate::error::{CheckoutError, Result};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a completed checkout.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CheckoutResult {
    pub success: bool,
    /// Present iff the checkout succeeded.
    pub transaction_id: Option<TransactionId>,
    pub message: String,
}

/// The checkout orchestrator.
///
/// Owns the collaborator ports and runs each checkout as a single sequential
/// flow: resolve customer and cart, check availability, price the cart,
/// authorize payment, decrement stock. A decrement failure after
/// authorization triggers a payment cancellation before the error surfaces.
///
/// The engine holds no locks and performs no retries; every collaborator
/// call is bounded by a per-call timeout.
pub struct CheckoutEngine {
    customers: CustomerLookupBox,
    carts: CartLookupBox,
    inventory: InventoryServiceBox,
    payments: PaymentServiceBox,
    call_timeout: Duration,
}

impl CheckoutEngine {
    pub fn new(
        customers: CustomerLookupBox,
        carts: CartLookupBox,
        inventory: InventoryServiceBox,
        payments: PaymentServiceBox,
    ) -> Self {
        Self {
            customers,
            carts,
            inventory,
            payments,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Overrides the timeout applied to each collaborator call.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Finalizes the purchase of `cart_id` for `customer_id`.
    ///
    /// Succeeds only when the payment was authorized AND the stock was
    /// decremented. If the decrement fails after authorization, the payment
    /// is cancelled exactly once and `StockUpdate` is returned.
    pub async fn finalize_checkout(
        &self,
        cart_id: CartId,
        customer_id: CustomerId,
    ) -> Result<CheckoutResult> {
        let customer = self
            .call(self.customers.by_id(customer_id))
            .await?
            .ok_or(CheckoutError::CustomerNotFound(customer_id))?;

        let cart = self
            .call(self.carts.by_id_and_customer(cart_id, &customer))
            .await?
            .ok_or(CheckoutError::CartNotFound(cart_id))?;

        let (product_ids, quantities) = cart.stock_request();

        let availability = self
            .call(self.inventory.check_availability(&product_ids, &quantities))
            .await?;
        if !availability.available {
            return Err(CheckoutError::OutOfStock {
                unavailable: availability.unavailable,
            });
        }

        let total = pricing::compute_total(&cart, customer.tier)?;
        debug!(cart_id, customer_id, %total, "cart priced");

        let authorization = self
            .call(self.payments.authorize(customer.id, total))
            .await?;
        if !authorization.authorized {
            return Err(CheckoutError::PaymentDeclined);
        }
        let transaction_id = authorization.transaction_id.ok_or_else(|| {
            CheckoutError::Unexpected("authorized payment carried no transaction id".to_string())
        })?;

        let decrement = self
            .call(self.inventory.decrement(&product_ids, &quantities))
            .await?;
        if !decrement.success {
            // Best-effort compensation: the decrement failure stays the
            // surfaced error even if the cancellation fails too.
            if let Err(err) = self
                .call(self.payments.cancel(customer.id, transaction_id))
                .await
            {
                warn!(
                    customer_id,
                    transaction_id,
                    error = %err,
                    "payment cancellation failed after stock update failure"
                );
            }
            return Err(CheckoutError::StockUpdate);
        }

        debug!(cart_id, customer_id, transaction_id, "checkout completed");
        Ok(CheckoutResult {
            success: true,
            transaction_id: Some(transaction_id),
            message: "checkout completed".to_string(),
        })
    }

    async fn call<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(CheckoutError::Unexpected(
                "collaborator call timed out".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::Cart;
    use crate::domain::customer::{Customer, CustomerTier};
    use crate::domain::product::Product;
    use crate::infrastructure::in_memory::{
        InMemoryCarts, InMemoryCustomers, InMemoryInventory, InMemoryPayments,
    };
    use rust_decimal_macros::dec;

    async fn seeded_engine(
        tier: CustomerTier,
        payments: InMemoryPayments,
    ) -> (CheckoutEngine, InMemoryInventory) {
        let customers = InMemoryCustomers::new();
        customers.insert(Customer::new(1, tier)).await;

        let mut cart = Cart::new(1, 1);
        cart.add_item(Product::new(1, dec!(100.0), dec!(1.0)), 2);
        cart.add_item(Product::new(2, dec!(50.0), dec!(0.5)), 1);
        let carts = InMemoryCarts::new();
        carts.insert(cart).await;

        let inventory = InMemoryInventory::with_stock([(1, 10), (2, 5)]);

        let engine = CheckoutEngine::new(
            Box::new(customers),
            Box::new(carts),
            Box::new(inventory.clone()),
            Box::new(payments),
        );
        (engine, inventory)
    }

    #[tokio::test]
    async fn test_checkout_succeeds_and_decrements_stock() {
        let payments = InMemoryPayments::new();
        let (engine, inventory) = seeded_engine(CustomerTier::Base, payments.clone()).await;

        let result = engine.finalize_checkout(1, 1).await.unwrap();

        assert!(result.success);
        assert_eq!(result.message, "checkout completed");
        let transaction_id = result.transaction_id.unwrap();
        assert!(payments.is_authorized(transaction_id).await);
        assert_eq!(inventory.stock_of(1).await, 8);
        assert_eq!(inventory.stock_of(2).await, 4);
    }

    #[tokio::test]
    async fn test_unknown_customer_fails_fast() {
        let (engine, inventory) =
            seeded_engine(CustomerTier::Base, InMemoryPayments::new()).await;

        let err = engine.finalize_checkout(1, 99).await.unwrap_err();

        assert!(matches!(err, CheckoutError::CustomerNotFound(99)));
        assert_eq!(inventory.stock_of(1).await, 10);
    }

    #[tokio::test]
    async fn test_unknown_cart_fails_fast() {
        let (engine, _) = seeded_engine(CustomerTier::Base, InMemoryPayments::new()).await;

        let err = engine.finalize_checkout(42, 1).await.unwrap_err();

        assert!(matches!(err, CheckoutError::CartNotFound(42)));
    }

    #[tokio::test]
    async fn test_cart_owned_by_someone_else_is_not_found() {
        let customers = InMemoryCustomers::new();
        customers.insert(Customer::new(1, CustomerTier::Base)).await;

        let mut cart = Cart::new(1, 2);
        cart.add_item(Product::new(1, dec!(10.0), dec!(1.0)), 1);
        let carts = InMemoryCarts::new();
        carts.insert(cart).await;

        let engine = CheckoutEngine::new(
            Box::new(customers),
            Box::new(carts),
            Box::new(InMemoryInventory::with_stock([(1, 10)])),
            Box::new(InMemoryPayments::new()),
        );

        let err = engine.finalize_checkout(1, 1).await.unwrap_err();
        assert!(matches!(err, CheckoutError::CartNotFound(1)));
    }

    #[tokio::test]
    async fn test_declined_payment_leaves_stock_untouched() {
        // Cart totals 250, limit declines anything above 100.
        let payments = InMemoryPayments::with_limit(dec!(100));
        let (engine, inventory) = seeded_engine(CustomerTier::Base, payments).await;

        let err = engine.finalize_checkout(1, 1).await.unwrap_err();

        assert!(matches!(err, CheckoutError::PaymentDeclined));
        assert_eq!(inventory.stock_of(1).await, 10);
        assert_eq!(inventory.stock_of(2).await, 5);
    }

    #[tokio::test]
    async fn test_insufficient_stock_reports_the_short_products() {
        let customers = InMemoryCustomers::new();
        customers.insert(Customer::new(1, CustomerTier::Base)).await;

        let mut cart = Cart::new(1, 1);
        cart.add_item(Product::new(1, dec!(10.0), dec!(1.0)), 3);
        cart.add_item(Product::new(2, dec!(10.0), dec!(1.0)), 1);
        let carts = InMemoryCarts::new();
        carts.insert(cart).await;

        let engine = CheckoutEngine::new(
            Box::new(customers),
            Box::new(carts),
            Box::new(InMemoryInventory::with_stock([(1, 2), (2, 5)])),
            Box::new(InMemoryPayments::new()),
        );

        let err = engine.finalize_checkout(1, 1).await.unwrap_err();
        match err {
            CheckoutError::OutOfStock { unavailable } => assert_eq!(unavailable, vec![1]),
            other => panic!("expected OutOfStock, got {other:?}"),
        }
    }
}
