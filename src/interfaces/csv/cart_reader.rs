use crate::domain::ProductId;
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

/// One cart row: a product reference and a quantity.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
pub struct CartRecord {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Reads cart lines from a CSV source, preserving row order.
pub struct CartReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CartReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn records(self) -> impl Iterator<Item = Result<CartRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
