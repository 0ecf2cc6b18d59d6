use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn write_catalog(path: &Path, rows: &[(u64, &str, &str, u32)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "price", "weight", "stock"])?;
    for (id, price, weight, stock) in rows {
        wtr.write_record([
            id.to_string(),
            price.to_string(),
            weight.to_string(),
            stock.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_cart(path: &Path, rows: &[(u64, u32)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["product_id", "quantity"])?;
    for (product_id, quantity) in rows {
        wtr.write_record([product_id.to_string(), quantity.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
