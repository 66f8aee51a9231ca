use md5::{Digest, Md5};
use serde::{de, Deserialize};
use validator::validate_email;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Identifier of the member resource on the remote list: the hex MD5 of
    /// the trimmed, lower-cased address.
    pub fn member_hash(&self) -> MemberHash {
        let normalized = self.0.trim().to_lowercase();
        MemberHash(hex::encode(Md5::digest(normalized.as_bytes())))
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if validate_email(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(format!("{} is not a valid email", value))
        }
    }
}

impl TryFrom<&str> for SubscriberEmail {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_owned())
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SubscriberEmail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Self::try_from(String::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberHash(String);

impl std::fmt::Display for MemberHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for MemberHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
