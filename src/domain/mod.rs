mod merge_field;
mod subscriber;
mod subscriber_email;
mod subscription_status;

pub use merge_field::{MergeFieldType, MergeFieldUpdate, NewMergeField};
pub use subscriber::{MemberRequest, StatusChange, Subscriber};
pub use subscriber_email::{MemberHash, SubscriberEmail};
pub use subscription_status::SubscriptionStatus;
