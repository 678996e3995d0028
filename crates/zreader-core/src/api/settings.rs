//! Settings endpoints for book categories and storage providers.

use serde_json::Value;

use super::{ApiClient, ApiError, Envelope, RequestOptions};
use crate::models::{Category, NewCategory, NewStorage, StorageProvider};

const CATEGORY_PATH: &str = "/api/setting/category";
const STORAGE_PATH: &str = "/api/setting/storage";

impl ApiClient {
    // ===== Categories =====

    pub async fn list_categories(&self) -> Result<Envelope<Vec<Category>>, ApiError> {
        self.get(&format!("{}/list", CATEGORY_PATH)).await
    }

    pub async fn create_category(
        &self,
        category: &NewCategory,
    ) -> Result<Envelope<Category>, ApiError> {
        self.post(CATEGORY_PATH, category).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        category: &NewCategory,
    ) -> Result<Envelope<Category>, ApiError> {
        self.put(&format!("{}/{}", CATEGORY_PATH, id), category).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<Envelope<Value>, ApiError> {
        self.delete(&format!("{}/{}", CATEGORY_PATH, id)).await
    }

    // ===== Storage providers =====

    pub async fn list_storages(&self) -> Result<Envelope<Vec<StorageProvider>>, ApiError> {
        self.get(&format!("{}/list", STORAGE_PATH)).await
    }

    pub async fn create_storage(
        &self,
        storage: &NewStorage,
    ) -> Result<Envelope<StorageProvider>, ApiError> {
        self.post(STORAGE_PATH, storage).await
    }

    pub async fn update_storage(
        &self,
        id: i64,
        storage: &NewStorage,
    ) -> Result<Envelope<StorageProvider>, ApiError> {
        self.put(&format!("{}/{}", STORAGE_PATH, id), storage).await
    }

    pub async fn delete_storage(&self, id: i64) -> Result<Envelope<Value>, ApiError> {
        self.delete(&format!("{}/{}", STORAGE_PATH, id)).await
    }

    /// Flip the active flag of a storage provider
    pub async fn toggle_storage_active(&self, id: i64) -> Result<Envelope<Value>, ApiError> {
        self.send(
            &format!("{}/{}/toggle-active", STORAGE_PATH, id),
            RequestOptions::put(),
        )
        .await
    }
}
