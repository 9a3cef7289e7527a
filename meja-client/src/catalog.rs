//! Menu browsing for customers

use shared::Page;
use shared::models::MenuItem;

use crate::api::{MenuApi, MenuQuery};
use crate::error::ClientResult;
use crate::http::Gateway;

/// Paged menu plus local search
#[derive(Debug, Clone)]
pub struct Catalog {
    gateway: Gateway,
}

impl Catalog {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// One page of the menu
    pub async fn list(&self, query: &MenuQuery) -> ClientResult<Page<MenuItem>> {
        let page = MenuApi::new(&self.gateway).list(query).await?;
        tracing::debug!(page = page.page, items = page.items.len(), "Menu page loaded");
        Ok(page)
    }

    /// Every menu item
    pub async fn all(&self) -> ClientResult<Vec<MenuItem>> {
        MenuApi::new(&self.gateway).list_all().await
    }

    /// A single item; `NotFound` when the service has no data for it
    pub async fn get(&self, id: &str) -> ClientResult<MenuItem> {
        MenuApi::new(&self.gateway).get(id).await
    }

    /// Items whose name or description contains `query`, ignoring case
    pub fn filter<'a>(items: &'a [MenuItem], query: &str) -> Vec<&'a MenuItem> {
        items.iter().filter(|item| item.matches(query)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_name_and_description() {
        let items: Vec<MenuItem> = serde_json::from_str(
            r#"[{"id":"1","name":"Nasi Goreng","description":"Fried rice","price":25000},
                {"id":"2","name":"Mie Goreng","description":"Fried noodles","price":23000},
                {"id":"3","name":"Es Teh","description":"Sweet iced tea","price":8000}]"#,
        )
        .unwrap();

        let hits = Catalog::filter(&items, "goreng");
        assert_eq!(hits.len(), 2);
        let hits = Catalog::filter(&items, "TEA");
        assert_eq!(hits[0].id, "3");
        assert_eq!(Catalog::filter(&items, "").len(), 3);
    }
}
