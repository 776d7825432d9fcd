//! Listing filters for the storefront and admin product views.

use crate::domain::{Product, ProductType};

/// Storefront grid: in-stock items of the active tab matching the search
/// box. Search is case-insensitive over the description and a substring
/// match over the code. Filtering here keeps sold-out items off the grid
/// even when the fallback store served unfiltered rows.
pub fn storefront<'a>(products: &'a [Product], kind: ProductType, query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.stock > 0 && p.kind == kind)
        .filter(|p| p.description.to_lowercase().contains(&needle) || p.code.contains(query))
        .collect()
}

/// Admin panel search over the human-entered code.
pub fn search_by_code<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.code.contains(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, kind: ProductType, stock: i32, description: &str) -> Product {
        Product {
            id: id.into(),
            code: id.to_uppercase(),
            images: vec![],
            description: description.into(),
            kind,
            size: "M".into(),
            price: 50_000.0,
            stock,
            discount: 0.0,
        }
    }

    #[test]
    fn sold_out_products_never_appear() {
        let products = vec![
            product("a", ProductType::Sale, 0, "Red dress"),
            product("b", ProductType::Sale, 1, "Blue dress"),
        ];
        let listed = storefront(&products, ProductType::Sale, "");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "b");
    }

    #[test]
    fn listing_is_scoped_to_the_active_tab() {
        let products = vec![
            product("a", ProductType::Sale, 3, "Gown"),
            product("b", ProductType::Rent, 3, "Gown"),
        ];
        assert_eq!(storefront(&products, ProductType::Rent, "").len(), 1);
    }

    #[test]
    fn search_covers_description_and_code() {
        let products = vec![
            product("a", ProductType::Sale, 3, "Silk evening gown"),
            product("b", ProductType::Sale, 3, "Linen shirt"),
        ];
        assert_eq!(storefront(&products, ProductType::Sale, "EVENING").len(), 1);
        assert_eq!(storefront(&products, ProductType::Sale, "B")[0].id, "b");
        assert!(storefront(&products, ProductType::Sale, "velvet").is_empty());
    }

    #[test]
    fn code_search_is_substring_based() {
        let products = vec![
            product("a1", ProductType::Sale, 3, ""),
            product("a2", ProductType::Sale, 0, ""),
        ];
        // admin search includes sold-out items
        assert_eq!(search_by_code(&products, "A").len(), 2);
        assert_eq!(search_by_code(&products, "A2").len(), 1);
    }
}
