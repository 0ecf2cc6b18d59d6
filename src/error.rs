use crate::domain::{CartId, CustomerId, ProductId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Failures a checkout can surface to its caller.
///
/// Each variant is a distinct outcome class: the not-found variants map to a
/// "not found" response at the boundary, `OutOfStock`/`PaymentDeclined`/
/// `StockUpdate` map to a conflict, and everything else maps to an internal
/// error with a generic message.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),
    #[error("cart {0} not found")]
    CartNotFound(CartId),
    #[error("items out of stock: {unavailable:?}")]
    OutOfStock { unavailable: Vec<ProductId> },
    #[error("payment not authorized")]
    PaymentDeclined,
    /// Stock decrement failed after payment was authorized. The engine has
    /// already attempted to cancel the payment by the time this is raised.
    #[error("stock update failed")]
    StockUpdate,
    #[error("invalid checkout input: {0}")]
    InvalidInput(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}
