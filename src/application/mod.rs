//! Application layer containing the checkout orchestration.
//!
//! This module defines the `CheckoutEngine`, the primary entry point for
//! finalizing a purchase. It sequences the collaborator ports and owns the
//! compensation logic for partial failures.

pub mod checkout;
