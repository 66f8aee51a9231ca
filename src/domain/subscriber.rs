use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{MemberHash, SubscriberEmail, SubscriptionStatus};

/// One member of a mailing list, keyed by its email address.
#[derive(Clone, Debug, PartialEq)]
pub struct Subscriber {
    pub email: SubscriberEmail,
    pub status: SubscriptionStatus,
    pub merge_fields: BTreeMap<String, Value>,
}

impl Subscriber {
    pub fn new(email: SubscriberEmail) -> Self {
        Self {
            email,
            status: SubscriptionStatus::default(),
            merge_fields: BTreeMap::new(),
        }
    }

    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_merge_field(mut self, tag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.merge_fields.insert(tag.into(), value.into());
        self
    }

    pub fn member_hash(&self) -> MemberHash {
        self.email.member_hash()
    }

    /// Request body describing this member.
    pub fn format(&self) -> MemberRequest<'_> {
        MemberRequest {
            email_address: self.email.as_ref(),
            status: self.status,
            merge_fields: &self.merge_fields,
        }
    }
}

impl From<SubscriberEmail> for Subscriber {
    fn from(email: SubscriberEmail) -> Self {
        Self::new(email)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberRequest<'a> {
    email_address: &'a str,
    status: SubscriptionStatus,
    #[serde(skip_serializing_if = "is_empty")]
    merge_fields: &'a BTreeMap<String, Value>,
}

fn is_empty(merge_fields: &&BTreeMap<String, Value>) -> bool {
    merge_fields.is_empty()
}

impl<'a> MemberRequest<'a> {
    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }
}

/// Body that only moves a member between states.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StatusChange {
    pub status: SubscriptionStatus,
}

impl StatusChange {
    pub fn unsubscribe() -> Self {
        Self {
            status: SubscriptionStatus::Unsubscribed,
        }
    }
}
