use crate::domain::ProductId;
use crate::domain::product::Product;
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One catalog row: a product definition plus its opening stock level.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CatalogRecord {
    pub id: ProductId,
    pub price: Decimal,
    pub weight: Decimal,
    pub stock: u32,
}

impl CatalogRecord {
    pub fn product(&self) -> Product {
        Product::new(self.id, self.price, self.weight)
    }
}

/// Reads catalog rows from a CSV source.
///
/// Wraps `csv::Reader` and provides an iterator over `Result<CatalogRecord>`.
/// Whitespace is trimmed and record lengths are flexible.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    /// Creates a new `CatalogReader` from any `Read` source.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes catalog rows.
    pub fn records(self) -> impl Iterator<Item = Result<CatalogRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
