use checkout_engine::application::checkout::CheckoutEngine;
use checkout_engine::domain::cart::Cart;
use checkout_engine::domain::customer::{Customer, CustomerTier};
use checkout_engine::domain::pricing;
use checkout_engine::domain::product::Product;
use checkout_engine::domain::{CartId, CustomerId, ProductId};
use checkout_engine::infrastructure::in_memory::{
    InMemoryCarts, InMemoryCustomers, InMemoryInventory, InMemoryPayments,
};
use checkout_engine::interfaces::csv::cart_reader::CartReader;
use checkout_engine::interfaces::csv::catalog_reader::CatalogReader;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

const CUSTOMER_ID: CustomerId = 1;
const CART_ID: CartId = 1;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product catalog CSV file (id, price, weight, stock)
    catalog: PathBuf,

    /// Cart lines CSV file (product_id, quantity)
    cart: PathBuf,

    /// Customer tier (base, silver or gold)
    #[arg(long, default_value = "base")]
    tier: CustomerTier,

    /// Print the quoted total without running the checkout
    #[arg(long)]
    quote: bool,

    /// Decline payments above this amount
    #[arg(long)]
    credit_limit: Option<Decimal>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let inventory = InMemoryInventory::new();
    let mut catalog: HashMap<ProductId, Product> = HashMap::new();
    let file = File::open(&cli.catalog).into_diagnostic()?;
    for record in CatalogReader::new(file).records() {
        let record = record.into_diagnostic()?;
        inventory.set_stock(record.id, record.stock).await;
        catalog.insert(record.id, record.product());
    }

    let customer = Customer::new(CUSTOMER_ID, cli.tier);
    let mut cart = Cart::new(CART_ID, customer.id);
    let file = File::open(&cli.cart).into_diagnostic()?;
    for record in CartReader::new(file).records() {
        let record = record.into_diagnostic()?;
        let product = catalog
            .get(&record.product_id)
            .cloned()
            .ok_or_else(|| miette::miette!("product {} is not in the catalog", record.product_id))?;
        cart.add_item(product, record.quantity);
    }

    if cli.quote {
        let total = pricing::compute_total(&cart, customer.tier).into_diagnostic()?;
        println!("{total}");
        return Ok(());
    }

    let customers = InMemoryCustomers::new();
    customers.insert(customer).await;
    let carts = InMemoryCarts::new();
    carts.insert(cart).await;
    let payments = match cli.credit_limit {
        Some(limit) => InMemoryPayments::with_limit(limit),
        None => InMemoryPayments::new(),
    };

    let engine = CheckoutEngine::new(
        Box::new(customers),
        Box::new(carts),
        Box::new(inventory),
        Box::new(payments),
    );

    let result = engine
        .finalize_checkout(CART_ID, CUSTOMER_ID)
        .await
        .into_diagnostic()?;
    println!("{}", serde_json::to_string(&result).into_diagnostic()?);

    Ok(())
}
