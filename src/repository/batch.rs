use super::{member_path, ListRepository};
use crate::{
    api_client::{ApiClient, ApiError, Batch, BatchStatus},
    domain::{StatusChange, Subscriber, SubscriberEmail, SubscriptionStatus},
};

/// Upper bound on the operations submitted in one batch.
pub const SUBSCRIBER_BATCH_SIZE: usize = 300;

/// A chunk could not be submitted. Chunks before it were accepted and their
/// job ids are kept in `submitted`; nothing after it was sent.
#[derive(Debug, thiserror::Error)]
#[error("Failed to submit batch chunk {chunk}")]
pub struct BatchSubmissionError {
    pub chunk: usize,
    pub submitted: Vec<String>,
    #[source]
    pub source: ApiError,
}

impl<C: ApiClient> ListRepository<C> {
    /// Subscribes every member through batch jobs and returns one job id per
    /// chunk of [`SUBSCRIBER_BATCH_SIZE`].
    #[tracing::instrument(
        name = "Batch subscribing members",
        skip(self, subscribers),
        fields(members = subscribers.len())
    )]
    pub async fn batch_subscribe(
        &self,
        list_id: &str,
        subscribers: &[Subscriber],
    ) -> Result<Vec<String>, BatchSubmissionError> {
        self.submit_in_chunks(subscribers, |batch, operation_id, subscriber| {
            let path = member_path(list_id, &subscriber.member_hash());
            let body = subscriber
                .format()
                .with_status(SubscriptionStatus::Subscribed);
            batch.post(operation_id, &path, &body)
        })
        .await
    }

    #[tracing::instrument(
        name = "Batch unsubscribing members",
        skip(self, emails),
        fields(members = emails.len())
    )]
    pub async fn batch_unsubscribe(
        &self,
        list_id: &str,
        emails: &[SubscriberEmail],
    ) -> Result<Vec<String>, BatchSubmissionError> {
        self.submit_in_chunks(emails, |batch, operation_id, email| {
            let path = member_path(list_id, &email.member_hash());
            batch.patch(operation_id, &path, &StatusChange::unsubscribe())
        })
        .await
    }

    #[tracing::instrument(
        name = "Batch deleting members",
        skip(self, emails),
        fields(members = emails.len())
    )]
    pub async fn batch_delete(
        &self,
        list_id: &str,
        emails: &[SubscriberEmail],
    ) -> Result<Vec<String>, BatchSubmissionError> {
        self.submit_in_chunks(emails, |batch, operation_id, email| {
            batch.delete(operation_id, &member_path(list_id, &email.member_hash()));
            Ok(())
        })
        .await
    }

    #[tracing::instrument(name = "Checking batch status", skip(self))]
    pub async fn batch_status(&self, job_id: &str) -> Result<BatchStatus, ApiError> {
        self.client.batch_status(job_id).await
    }

    async fn submit_in_chunks<T, F>(
        &self,
        items: &[T],
        enqueue: F,
    ) -> Result<Vec<String>, BatchSubmissionError>
    where
        F: Fn(&mut Batch, String, &T) -> Result<(), ApiError>,
    {
        let mut job_ids = Vec::with_capacity(items.len().div_ceil(SUBSCRIBER_BATCH_SIZE));
        for (chunk, items) in items.chunks(SUBSCRIBER_BATCH_SIZE).enumerate() {
            match self.submit_chunk(items, &enqueue).await {
                Ok(status) => {
                    tracing::info!(
                        chunk,
                        operations = items.len(),
                        job_id = %status.id,
                        "Submitted batch chunk"
                    );
                    job_ids.push(status.id);
                }
                Err(source) => {
                    tracing::error!(
                        chunk,
                        error.message = %source,
                        "Failed to submit batch chunk"
                    );
                    return Err(BatchSubmissionError {
                        chunk,
                        submitted: job_ids,
                        source,
                    });
                }
            }
        }
        Ok(job_ids)
    }

    async fn submit_chunk<T, F>(&self, items: &[T], enqueue: &F) -> Result<BatchStatus, ApiError>
    where
        F: Fn(&mut Batch, String, &T) -> Result<(), ApiError>,
    {
        let mut batch = self.client.new_batch();
        for (i, item) in items.iter().enumerate() {
            enqueue(&mut batch, format!("op{}", i), item)?;
        }
        self.client.execute_batch(batch).await
    }
}
