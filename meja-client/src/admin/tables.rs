//! Table management

use shared::models::Meja;

use crate::api::TableApi;
use crate::error::{ClientError, ClientResult};
use crate::http::Gateway;
use crate::route::Notice;

/// Table list with create and rename
#[derive(Debug, Clone)]
pub struct TablesPanel {
    gateway: Gateway,
    tables: Vec<Meja>,
}

impl TablesPanel {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            tables: Vec::new(),
        }
    }

    pub fn tables(&self) -> &[Meja] {
        &self.tables
    }

    pub fn occupied(&self) -> usize {
        self.tables.iter().filter(|t| t.is_occupied()).count()
    }

    /// `GET /api/v1/meja`
    pub async fn refresh(&mut self) -> ClientResult<&[Meja]> {
        self.tables = TableApi::new(&self.gateway).list().await?;
        Ok(&self.tables)
    }

    /// Add a table, then refetch the list
    pub async fn create(&mut self, nomor_meja: &str) -> ClientResult<Notice> {
        let nomor_meja = required_number(nomor_meja)?;
        let created = TableApi::new(&self.gateway).create(nomor_meja).await?;
        tracing::info!(table_id = %created.id, nomor = %created.nomor_meja, "Table created");
        self.refresh().await?;
        Ok(Notice::info(
            "Table Added",
            format!("Table {nomor_meja} has been added successfully."),
        ))
    }

    /// Change a table's number, then refetch the list
    pub async fn rename(&mut self, id: &str, nomor_meja: &str) -> ClientResult<Notice> {
        let nomor_meja = required_number(nomor_meja)?;
        TableApi::new(&self.gateway).rename(id, nomor_meja).await?;
        self.refresh().await?;
        Ok(Notice::info(
            "Table Updated",
            "Table number has been updated successfully.",
        ))
    }
}

fn required_number(nomor_meja: &str) -> ClientResult<&str> {
    let trimmed = nomor_meja.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation("Table number is required".into()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_number_is_rejected() {
        assert!(matches!(required_number("  "), Err(ClientError::Validation(_))));
        assert_eq!(required_number(" M05 ").unwrap(), "M05");
    }
}
