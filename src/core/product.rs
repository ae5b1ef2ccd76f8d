//! Product business logic - the catalogue of cylinder sizes.

use crate::{
    entities::Product,
    errors::{Error, Result},
    store::Store,
};
use tracing::info;

/// Retrieves the whole product catalogue in stored order.
pub async fn list_products(store: &Store) -> Result<Vec<Product>> {
    Ok(store.read(|db| db.products.clone()).await)
}

/// Finds a product by id.
pub async fn get_product(store: &Store, id: &str) -> Result<Option<Product>> {
    Ok(store
        .read(|db| db.products.iter().find(|p| p.id == id).cloned())
        .await)
}

/// Adds a product to the catalogue after validating it.
///
/// # Errors
/// Returns an error if:
/// - The id or name is empty or whitespace-only
/// - The unit cost is negative or not finite
/// - A product with the same id already exists
pub async fn add_product(store: &Store, product: Product) -> Result<Product> {
    if product.id.trim().is_empty() {
        return Err(Error::validation("Product id cannot be empty"));
    }
    if product.name.trim().is_empty() {
        return Err(Error::validation("Product name cannot be empty"));
    }
    super::validate_amount(product.unit_cost)?;

    let product = Product {
        id: product.id.trim().to_string(),
        name: product.name.trim().to_string(),
        unit_cost: product.unit_cost,
    };

    let saved = store
        .write(|db| {
            if db.products.iter().any(|p| p.id == product.id) {
                return Err(Error::DuplicateId {
                    kind: "product",
                    id: product.id.clone(),
                });
            }
            db.products.push(product.clone());
            Ok(product)
        })
        .await?;
    info!(product = %saved.id, "Added product");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_list_products_seeded() -> Result<()> {
        let store = setup_test_store();
        let products = list_products(&store).await?;
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].id, "prod_14kg");
        Ok(())
    }

    #[tokio::test]
    async fn test_add_product_integration() -> Result<()> {
        let store = setup_test_store();
        let added = add_product(&store, Product::new(" prod_2kg ", "2kg", 250.0)).await?;
        assert_eq!(added.id, "prod_2kg");

        let found = get_product(&store, "prod_2kg").await?.unwrap();
        assert_eq!(found.unit_cost, 250.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_product_validation() -> Result<()> {
        let store = setup_test_store();

        let result = add_product(&store, Product::new("", "2kg", 1.0)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = add_product(&store, Product::new("prod_x", "   ", 1.0)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = add_product(&store, Product::new("prod_x", "x", -1.0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -1.0 }
        ));

        let result = add_product(&store, Product::new("prod_x", "x", f64::NAN)).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        let result = add_product(&store, Product::new("prod_5kg", "5kg", 1.0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateId { kind: "product", .. }
        ));

        assert_eq!(list_products(&store).await?.len(), 5);
        Ok(())
    }
}
