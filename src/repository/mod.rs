mod batch;
mod members;
mod merge_fields;

pub use batch::{BatchSubmissionError, SUBSCRIBER_BATCH_SIZE};

use crate::{api_client::ApiClient, domain::MemberHash};

/// Largest page the API serves for collection reads.
const COLLECTION_PAGE_SIZE: &str = "1000";

/// List and member operations against the remote API. Stateless apart from
/// the client it owns.
#[derive(Clone, Debug)]
pub struct ListRepository<C> {
    client: C,
}

impl<C: ApiClient> ListRepository<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

fn list_path(list_id: &str) -> String {
    format!("lists/{}", list_id)
}

fn members_path(list_id: &str) -> String {
    format!("{}/members", list_path(list_id))
}

fn member_path(list_id: &str, member: &MemberHash) -> String {
    format!("{}/{}", members_path(list_id), member)
}

fn merge_fields_path(list_id: &str) -> String {
    format!("{}/merge-fields", list_path(list_id))
}

fn merge_field_path(list_id: &str, merge_id: &str) -> String {
    format!("{}/{}", merge_fields_path(list_id), merge_id)
}
