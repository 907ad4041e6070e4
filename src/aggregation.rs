use crate::model::Product;

/// Total stock value of a collection: the sum of `price * quantity`.
///
/// Returns `0.0` for an empty slice.
pub fn total(products: &[Product]) -> f64 {
    products.iter().map(Product::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_of_empty_collection_is_zero() {
        assert_eq!(total(&[]), 0.0);
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let products = vec![
            Product::new("a", "Pen", 10.0, 2.0),
            Product::new("b", "Ink", 5.0, 1.0),
        ];
        assert_eq!(total(&products), 25.0);
        // input untouched
        assert_eq!(products[0].quantity, 2.0);
    }
}
