use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use shop_catalog::{Product, ProductTaxon, Taxon};
use shop_core::repository::{
    OrderRepository, ProductRepository, ProductTaxonRepository, RepoResult, TaxonRepository,
};
use shop_order::Order;

#[derive(Default)]
struct CatalogData {
    taxons: HashMap<String, Taxon>,
    /// Insertion order is kept for `find_all`
    products: Vec<Product>,
    product_index: HashMap<String, usize>,
    product_taxons: Vec<ProductTaxon>,
    orders: HashMap<String, Order>,
}

impl CatalogData {
    fn product(&self, code: &str) -> Option<&Product> {
        self.product_index.get(code).map(|&i| &self.products[i])
    }

    /// Links of a taxon in position order
    fn links<'a>(&'a self, taxon_code: &'a str) -> impl Iterator<Item = &'a ProductTaxon> + 'a {
        let mut links: Vec<&ProductTaxon> = self.product_taxons
            .iter()
            .filter(|pt| pt.taxon_code == taxon_code)
            .collect();
        links.sort_by_key(|pt| pt.position);
        links.into_iter()
    }
}

/// Catalog, taxonomy and orders held in memory
#[derive(Default)]
pub struct InMemoryCatalog {
    data: RwLock<CatalogData>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_taxon(&self, taxon: Taxon) {
        let mut data = self.data.write().await;
        data.taxons.insert(taxon.code.clone(), taxon);
    }

    /// Replaces an existing product with the same code
    pub async fn insert_product(&self, product: Product) {
        let mut data = self.data.write().await;
        let existing = data.product_index.get(&product.code).copied();
        match existing {
            Some(i) => data.products[i] = product,
            None => {
                let i = data.products.len();
                data.product_index.insert(product.code.clone(), i);
                data.products.push(product);
            }
        }
    }

    pub async fn link(&self, link: ProductTaxon) {
        self.data.write().await.product_taxons.push(link);
    }

    pub async fn insert_order(&self, order: Order) {
        let mut data = self.data.write().await;
        data.orders.insert(order.number.clone(), order);
    }
}

#[async_trait]
impl TaxonRepository for InMemoryCatalog {
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Taxon>> {
        Ok(self.data.read().await.taxons.get(code).cloned())
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        Ok(self.data.read().await.products.clone())
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Product>> {
        Ok(self.data.read().await.product(code).cloned())
    }
}

#[async_trait]
impl ProductTaxonRepository for InMemoryCatalog {
    async fn find_products_by_taxon(&self, taxon: &Taxon, limit: usize) -> RepoResult<Vec<Product>> {
        let data = self.data.read().await;
        // Dangling links still count towards the limit
        let products: Vec<Product> = data.links(&taxon.code)
            .take(limit)
            .filter_map(|pt| data.product(&pt.product_code).cloned())
            .collect();

        debug!(taxon = %taxon.code, found = products.len(), "loaded taxon products");
        Ok(products)
    }

    async fn count_enabled_products(&self, taxon: &Taxon) -> RepoResult<u64> {
        let data = self.data.read().await;
        let count = data.links(&taxon.code)
            .filter(|pt| data.product(&pt.product_code).is_some_and(|p| p.enabled))
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl OrderRepository for InMemoryCatalog {
    async fn find_by_number(&self, number: &str) -> RepoResult<Option<Order>> {
        Ok(self.data.read().await.orders.get(number).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> InMemoryCatalog {
        let store = InMemoryCatalog::new();
        store.insert_taxon(Taxon::new("MUGS", "Mugs")).await;
        store.insert_product(Product::new("MUG-1", "Red mug")).await;
        store.insert_product(Product::new("MUG-2", "Blue mug").disabled()).await;
        store.insert_product(Product::new("MUG-3", "Green mug")).await;

        for (code, position) in [("MUG-3", 0), ("MUG-1", 1), ("MUG-2", 2)] {
            store.link(ProductTaxon {
                product_code: code.to_string(),
                taxon_code: "MUGS".to_string(),
                position,
            }).await;
        }
        store
    }

    #[tokio::test]
    async fn test_taxon_lookup() {
        let store = seeded().await;
        assert_eq!(TaxonRepository::find_by_code(&store, "MUGS").await.unwrap().unwrap().name, "Mugs");
        assert!(TaxonRepository::find_by_code(&store, "HATS").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_products_by_taxon_in_position_order() {
        let store = seeded().await;
        let taxon = Taxon::new("MUGS", "Mugs");

        let products = store.find_products_by_taxon(&taxon, 15).await.unwrap();
        let codes: Vec<_> = products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["MUG-3", "MUG-1", "MUG-2"]);

        let limited = store.find_products_by_taxon(&taxon, 2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_count_enabled_products() {
        let store = seeded().await;
        let count = store.count_enabled_products(&Taxon::new("MUGS", "Mugs")).await.unwrap();
        assert_eq!(count, 2);
        let none = store.count_enabled_products(&Taxon::new("HATS", "Hats")).await.unwrap();
        assert_eq!(none, 0);
    }

    #[tokio::test]
    async fn test_insert_product_replaces_by_code() {
        let store = seeded().await;
        store.insert_product(Product::new("MUG-1", "Renamed mug")).await;

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Renamed mug");
    }

    #[tokio::test]
    async fn test_order_lookup() {
        let store = InMemoryCatalog::new();
        store.insert_order(Order::new("000042", "WEB", "EUR")).await;

        assert!(store.find_by_number("000042").await.unwrap().is_some());
        assert!(store.find_by_number("000043").await.unwrap().is_none());
    }
}
