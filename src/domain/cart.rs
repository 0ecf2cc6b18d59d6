use super::product::Product;
use super::{CartId, CustomerId, ProductId};
use serde::{Deserialize, Serialize};

/// One cart line: a product and how many units of it.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

/// A customer's shopping cart.
///
/// Lines keep their insertion order; the stock request sent to inventory is
/// built in that order. Carts stay mutable until a checkout commits.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Cart {
    pub id: CartId,
    pub customer: CustomerId,
    pub items: Vec<LineItem>,
}

impl Cart {
    pub fn new(id: CartId, customer: CustomerId) -> Self {
        Self {
            id,
            customer,
            items: Vec::new(),
        }
    }

    /// Appends a line for `product` at the end of the cart.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        self.items.push(LineItem { product, quantity });
    }

    /// Removes every line referencing `product_id`.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product.id != product_id);
    }

    /// Product ids and quantities in line order, shaped the way the
    /// inventory contract expects them.
    pub fn stock_request(&self) -> (Vec<ProductId>, Vec<u32>) {
        let ids = self.items.iter().map(|item| item.product.id).collect();
        let quantities = self.items.iter().map(|item| item.quantity).collect();
        (ids, quantities)
    }
}
