//! Menu management

use shared::models::{MenuItem, MenuUpsert};

use crate::api::{MENU_IMAGE_FOLDER, MenuApi, StorageApi, menu_image_key};
use crate::error::{ClientError, ClientResult};
use crate::http::Gateway;
use crate::route::Notice;

/// Image picked in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Add/edit form as the admin typed it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuForm {
    pub name: String,
    pub description: String,
    /// Raw price input
    pub price: String,
    pub quantity: Option<i32>,
    /// Current image URL, kept when no new image is uploaded
    pub image_url: String,
    pub image: Option<ImageFile>,
}

impl MenuForm {
    /// Prefill from an existing item (edit dialog)
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            quantity: item.quantity,
            image_url: item.image_url.clone(),
            image: None,
        }
    }

    /// Required fields present and price a non-negative number
    pub fn validate(&self) -> ClientResult<f64> {
        if self.name.trim().is_empty()
            || self.description.trim().is_empty()
            || self.price.trim().is_empty()
        {
            return Err(ClientError::Validation(
                "Please fill in all required fields.".into(),
            ));
        }
        match self.price.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
            _ => Err(ClientError::Validation(format!(
                "Price must be a number, got \"{}\"",
                self.price.trim()
            ))),
        }
    }

    fn into_upsert(self, price: f64, image_url: String) -> MenuUpsert {
        MenuUpsert {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            image_url,
            quantity: self.quantity,
            price,
        }
    }
}

/// Menu list with create, update and delete
#[derive(Debug, Clone)]
pub struct MenuPanel {
    gateway: Gateway,
    items: Vec<MenuItem>,
}

impl MenuPanel {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// `GET /api/menus`
    pub async fn refresh(&mut self) -> ClientResult<&[MenuItem]> {
        self.items = MenuApi::new(&self.gateway).list_all().await?;
        Ok(&self.items)
    }

    /// Upload the form's image, if any. Returns the URL to store.
    async fn image_url(&self, form: &MenuForm) -> ClientResult<String> {
        let Some(image) = &form.image else {
            return Ok(form.image_url.clone());
        };
        let key = menu_image_key(form.name.trim(), chrono::Utc::now().timestamp_millis());
        StorageApi::new(&self.gateway)
            .upload(&image.file_name, image.bytes.clone(), &key, MENU_IMAGE_FOLDER)
            .await
    }

    pub async fn create(&mut self, form: MenuForm) -> ClientResult<Notice> {
        let price = form.validate()?;
        let image_url = self.image_url(&form).await?;
        let created = MenuApi::new(&self.gateway)
            .create(&form.into_upsert(price, image_url))
            .await?;
        tracing::info!(menu_id = %created.id, name = %created.name, "Menu item created");
        self.refresh().await?;
        Ok(Notice::info(
            "Menu Item Added",
            format!("{} has been added to the menu.", created.name),
        ))
    }

    pub async fn update(&mut self, id: &str, form: MenuForm) -> ClientResult<Notice> {
        let price = form.validate()?;
        let image_url = self.image_url(&form).await?;
        let updated = MenuApi::new(&self.gateway)
            .update(id, &form.into_upsert(price, image_url))
            .await?;
        self.refresh().await?;
        Ok(Notice::info(
            "Menu Item Updated",
            format!("{} has been updated.", updated.name),
        ))
    }

    pub async fn delete(&mut self, id: &str) -> ClientResult<Notice> {
        MenuApi::new(&self.gateway).delete(id).await?;
        tracing::info!(menu_id = id, "Menu item deleted");
        self.refresh().await?;
        Ok(Notice::info(
            "Menu Item Deleted",
            "The menu item has been removed.",
        ))
    }
}
