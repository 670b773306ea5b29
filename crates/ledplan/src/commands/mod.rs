pub mod completion;
pub mod config;
pub mod controllers;
pub mod plan;
pub mod sweep;

use anyhow::Result;

use crate::cli::ProductArgs;
use ledplan::Product;

/// Resolve the product from `--product <file>` or the inline geometry flags.
pub fn load_product(args: &ProductArgs) -> Result<Product> {
    if let Some(path) = &args.product {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        return Product::load_from(path);
    }
    match (args.width, args.height, args.pitch) {
        (Some(width), Some(height), Some(pitch)) => {
            let product = Product::new(&args.name, width, height, pitch);
            product.validate()?;
            Ok(product)
        }
        _ => anyhow::bail!(
            "No product given. Pass --product <file> or --width, --height and --pitch."
        ),
    }
}
