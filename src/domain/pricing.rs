use super::cart::Cart;
use super::customer::CustomerTier;
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Computes the final charge for a cart: product subtotal plus weight-based
/// freight, with the customer's tier discount applied to the freight and the
/// volume discount applied to the subtotal.
///
/// Pure and deterministic. The cart is never mutated; calling this twice
/// with the same inputs returns the same total.
///
/// Fails with `InvalidInput` when a line has zero quantity or a negative
/// price or weight.
pub fn compute_total(cart: &Cart, tier: CustomerTier) -> Result<Decimal> {
    let mut product_total = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for item in &cart.items {
        if item.quantity == 0 {
            return Err(CheckoutError::InvalidInput(format!(
                "product {} has zero quantity",
                item.product.id
            )));
        }
        if item.product.price < Decimal::ZERO {
            return Err(CheckoutError::InvalidInput(format!(
                "product {} has a negative price",
                item.product.id
            )));
        }
        if item.product.weight < Decimal::ZERO {
            return Err(CheckoutError::InvalidInput(format!(
                "product {} has a negative weight",
                item.product.id
            )));
        }

        let quantity = Decimal::from(item.quantity);
        product_total += item.product.price * quantity;
        total_weight += item.product.weight * quantity;
    }

    let freight = tier_freight(base_freight(total_weight), tier);
    Ok(volume_discount(product_total) + freight)
}

/// Freight rate schedule over total weight. Upper bounds are inclusive.
fn base_freight(weight: Decimal) -> Decimal {
    if weight <= dec!(5) {
        Decimal::ZERO
    } else if weight <= dec!(10) {
        weight * dec!(2)
    } else if weight <= dec!(50) {
        weight * dec!(4)
    } else {
        weight * dec!(7)
    }
}

fn tier_freight(freight: Decimal, tier: CustomerTier) -> Decimal {
    match tier {
        CustomerTier::Gold => Decimal::ZERO,
        CustomerTier::Silver => freight * dec!(0.5),
        CustomerTier::Base => freight,
    }
}

/// Volume discount on the product subtotal. Both bounds are strict: exactly
/// 1000 falls through to the 10% band, exactly 500 gets no discount.
fn volume_discount(product_total: Decimal) -> Decimal {
    if product_total > dec!(1000) {
        product_total * dec!(0.8)
    } else if product_total > dec!(500) {
        product_total * dec!(0.9)
    } else {
        product_total
    }
}
