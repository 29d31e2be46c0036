use serde::Deserialize;

/// One catalog record. Never mutated after it is fetched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    /// Image URL.
    pub thumbnail: String,
}

/// Response envelope shared by the list and search endpoints.
///
/// The service also sends `total`, `skip` and `limit`; only `products` is
/// used, so the rest is left to serde's unknown-field handling.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ignores_envelope_counters() {
        let body = r#"{
            "products": [
                {"id": 1, "title": "Essence Mascara Lash Princess", "price": 9.99,
                 "thumbnail": "https://cdn.dummyjson.com/1/thumbnail.webp",
                 "rating": 4.94, "tags": ["beauty"]}
            ],
            "total": 194, "skip": 0, "limit": 1
        }"#;
        let page: ProductPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].id, 1);
        assert_eq!(page.products[0].price, 9.99);
    }

    #[test]
    fn integral_price_parses_as_float() {
        let body = r#"{"products":[{"id":7,"title":"Chair","price":120,"thumbnail":"t"}]}"#;
        let page: ProductPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.products[0].price, 120.0);
    }

    #[test]
    fn missing_products_field_is_an_error() {
        assert!(serde_json::from_str::<ProductPage>(r#"{"total":0}"#).is_err());
    }
}
