use serde::{Deserialize, Serialize};

use super::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BatchMethod {
    Post,
    Patch,
    Delete,
}

/// One queued request inside a batch. `body` holds the JSON-encoded request,
/// which is how the batches endpoint expects it.
#[derive(Clone, Debug, Serialize)]
pub struct BatchOperation {
    pub method: BatchMethod,
    pub path: String,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Operations collected for a single batch submission.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Batch {
    operations: Vec<BatchOperation>,
}

impl Batch {
    pub fn post<B>(&mut self, operation_id: String, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body)?;
        self.push(BatchMethod::Post, operation_id, path, Some(body));
        Ok(())
    }

    pub fn patch<B>(&mut self, operation_id: String, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body)?;
        self.push(BatchMethod::Patch, operation_id, path, Some(body));
        Ok(())
    }

    pub fn delete(&mut self, operation_id: String, path: &str) {
        self.push(BatchMethod::Delete, operation_id, path, None);
    }

    pub fn operations(&self) -> &[BatchOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn push(&mut self, method: BatchMethod, operation_id: String, path: &str, body: Option<String>) {
        self.operations.push(BatchOperation {
            method,
            path: format!("/{}", path.trim_start_matches('/')),
            operation_id,
            body,
        });
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchState {
    Pending,
    Preprocessing,
    Started,
    Finalizing,
    Finished,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Status record of a submitted batch job.
#[derive(Clone, Debug, Deserialize)]
pub struct BatchStatus {
    pub id: String,
    #[serde(default)]
    pub status: BatchState,
    #[serde(default)]
    pub total_operations: u64,
    #[serde(default)]
    pub finished_operations: u64,
    #[serde(default)]
    pub errored_operations: u64,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub response_body_url: Option<String>,
}

impl BatchStatus {
    pub fn is_finished(&self) -> bool {
        self.status == BatchState::Finished
    }
}
