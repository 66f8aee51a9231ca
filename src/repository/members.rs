use serde::Deserialize;
use serde_json::Value;

use super::{list_path, member_path, members_path, ListRepository, COLLECTION_PAGE_SIZE};
use crate::{
    api_client::{ApiClient, ApiError},
    domain::{StatusChange, Subscriber, SubscriberEmail, SubscriptionStatus},
};

#[derive(Deserialize)]
struct MembersPage {
    #[serde(default)]
    members: Vec<MemberEmail>,
    #[serde(default)]
    total_items: usize,
}

#[derive(Deserialize)]
struct MemberEmail {
    email_address: String,
}

impl<C: ApiClient> ListRepository<C> {
    #[tracing::instrument(name = "Fetching a list", skip(self))]
    pub async fn find_by_id(&self, list_id: &str) -> Result<Value, ApiError> {
        self.client.get(&list_path(list_id), &[]).await
    }

    /// Adds the subscriber to the list. The request always carries
    /// `subscribed`, whatever status the subscriber holds.
    #[tracing::instrument(
        name = "Subscribing a member",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    pub async fn subscribe(&self, list_id: &str, subscriber: &Subscriber) -> Result<Value, ApiError> {
        let body = subscriber
            .format()
            .with_status(SubscriptionStatus::Subscribed);
        self.client.post(&members_path(list_id), &body).await
    }

    #[tracing::instrument(
        name = "Updating a member",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    pub async fn update(&self, list_id: &str, subscriber: &Subscriber) -> Result<Value, ApiError> {
        let path = member_path(list_id, &subscriber.member_hash());
        self.client.patch(&path, &subscriber.format()).await
    }

    /// Merge fields on `subscriber` are ignored; only the status changes.
    #[tracing::instrument(
        name = "Unsubscribing a member",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    pub async fn unsubscribe(
        &self,
        list_id: &str,
        subscriber: &Subscriber,
    ) -> Result<Value, ApiError> {
        let path = member_path(list_id, &subscriber.member_hash());
        self.client.patch(&path, &StatusChange::unsubscribe()).await
    }

    #[tracing::instrument(
        name = "Deleting a member",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    pub async fn delete(&self, list_id: &str, subscriber: &Subscriber) -> Result<(), ApiError> {
        let path = member_path(list_id, &subscriber.member_hash());
        self.client.delete(&path).await.map(|_| ())
    }

    #[tracing::instrument(name = "Fetching a member", skip(self, email), fields(subscriber_email = %email))]
    pub async fn find_subscriber(
        &self,
        list_id: &str,
        email: &SubscriberEmail,
    ) -> Result<Value, ApiError> {
        self.client
            .get(&member_path(list_id, &email.member_hash()), &[])
            .await
    }

    /// Addresses of the list's members, in the order the API returns them.
    ///
    /// Only the first page of up to 1000 members is read. Larger lists are
    /// truncated and a warning records the reported total.
    #[tracing::instrument(name = "Fetching member emails", skip(self))]
    pub async fn subscriber_emails(&self, list_id: &str) -> Result<Vec<String>, ApiError> {
        let query = [
            ("count", COLLECTION_PAGE_SIZE.to_string()),
            ("fields", "members.email_address,total_items".to_string()),
        ];
        let payload = self.client.get(&members_path(list_id), &query).await?;
        let page: MembersPage = serde_json::from_value(payload)?;
        if page.total_items > page.members.len() {
            tracing::warn!(
                total_items = page.total_items,
                returned = page.members.len(),
                "Member list is larger than one page"
            );
        }
        Ok(page.members.into_iter().map(|m| m.email_address).collect())
    }
}
