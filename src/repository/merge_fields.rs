use serde::Deserialize;
use serde_json::Value;

use super::{merge_field_path, merge_fields_path, ListRepository, COLLECTION_PAGE_SIZE};
use crate::{
    api_client::{ApiClient, ApiError},
    domain::{MergeFieldUpdate, NewMergeField},
};

#[derive(Deserialize)]
struct MergeFieldsPage {
    #[serde(default)]
    merge_fields: Vec<Value>,
}

impl<C: ApiClient> ListRepository<C> {
    #[tracing::instrument(name = "Fetching merge fields", skip(self))]
    pub async fn merge_fields(&self, list_id: &str) -> Result<Vec<Value>, ApiError> {
        let query = [("count", COLLECTION_PAGE_SIZE.to_string())];
        let payload = self.client.get(&merge_fields_path(list_id), &query).await?;
        let page: MergeFieldsPage = serde_json::from_value(payload)?;
        Ok(page.merge_fields)
    }

    #[tracing::instrument(name = "Adding a merge field", skip(self, data), fields(merge_field = %data.name))]
    pub async fn add_merge_field(
        &self,
        list_id: &str,
        data: &NewMergeField,
    ) -> Result<Value, ApiError> {
        self.client.post(&merge_fields_path(list_id), data).await
    }

    #[tracing::instrument(name = "Updating a merge field", skip(self, data))]
    pub async fn update_merge_field(
        &self,
        list_id: &str,
        merge_id: &str,
        data: &MergeFieldUpdate,
    ) -> Result<Value, ApiError> {
        self.client
            .patch(&merge_field_path(list_id, merge_id), data)
            .await
    }

    #[tracing::instrument(name = "Deleting a merge field", skip(self))]
    pub async fn delete_merge_field(&self, list_id: &str, merge_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&merge_field_path(list_id, merge_id))
            .await
            .map(|_| ())
    }
}
