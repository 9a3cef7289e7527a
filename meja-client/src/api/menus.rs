//! Menu service: catalog

use serde::Serialize;
use serde::de::IgnoredAny;
use shared::models::{MenuItem, MenuUpsert};
use shared::{ApiEnvelope, Page};

use super::{envelope_data, require_data};
use crate::config::Service;
use crate::error::{ClientError, ClientResult};
use crate::http::{Auth, Gateway};

/// Paging and search parameters for `GET /api/menus`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuQuery {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl MenuQuery {
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size,
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then_some(search);
        self
    }
}

impl Default for MenuQuery {
    fn default() -> Self {
        Self::page(1, 10)
    }
}

/// Menu endpoints
#[derive(Debug, Clone, Copy)]
pub struct MenuApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> MenuApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/menus?page&size[&search]`
    pub async fn list(&self, query: &MenuQuery) -> ClientResult<Page<MenuItem>> {
        let envelope: ApiEnvelope<Vec<MenuItem>> = self
            .gateway
            .get_query(Service::Menu, "/api/menus", query, Auth::None)
            .await?;
        let total = envelope.total;
        let items = envelope_data(envelope)?.unwrap_or_default();
        Ok(Page::new(items, query.page, query.size, total))
    }

    /// `GET /api/menus` without paging: every item
    pub async fn list_all(&self) -> ClientResult<Vec<MenuItem>> {
        let envelope: ApiEnvelope<Vec<MenuItem>> = self
            .gateway
            .get(Service::Menu, "/api/menus", Auth::None)
            .await?;
        Ok(envelope_data(envelope)?.unwrap_or_default())
    }

    /// `GET /api/menus/:id`
    pub async fn get(&self, id: &str) -> ClientResult<MenuItem> {
        let envelope: ApiEnvelope<MenuItem> = self
            .gateway
            .get(Service::Menu, &format!("/api/menus/{id}"), Auth::None)
            .await?;
        envelope_data(envelope)?.ok_or_else(|| ClientError::NotFound(format!("menu {id}")))
    }

    /// `POST /api/menus` (admin)
    pub async fn create(&self, menu: &MenuUpsert) -> ClientResult<MenuItem> {
        let envelope = self
            .gateway
            .post(Service::Menu, "/api/menus", menu, Auth::Admin)
            .await?;
        require_data(envelope, "create menu")
    }

    /// `PUT /api/menus/:id` (admin)
    pub async fn update(&self, id: &str, menu: &MenuUpsert) -> ClientResult<MenuItem> {
        let envelope = self
            .gateway
            .put(Service::Menu, &format!("/api/menus/{id}"), menu, Auth::Admin)
            .await?;
        require_data(envelope, "update menu")
    }

    /// `DELETE /api/menus/:id` (admin)
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let envelope: Option<ApiEnvelope<IgnoredAny>> = self
            .gateway
            .delete(Service::Menu, &format!("/api/menus/{id}"), Auth::Admin)
            .await?;
        if let Some(envelope) = envelope {
            envelope_data(envelope)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_omitted() {
        let query = MenuQuery::page(0, 10).with_search("   ");
        assert_eq!(query.page, 1);
        assert_eq!(query.search, None);

        let query = MenuQuery::default().with_search("nasi");
        assert_eq!(query.search.as_deref(), Some("nasi"));
    }
}
