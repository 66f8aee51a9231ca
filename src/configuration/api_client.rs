use std::time::Duration;

use reqwest::Url;
use secrecy::Secret;
use serde::{de, Deserialize};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::api_client::HttpApiClient;

#[derive(Clone, Debug, Deserialize)]
pub struct ApiClientSettings {
    pub base_url: UrlWrapper,
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ApiClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self) -> Result<HttpApiClient, reqwest::Error> {
        HttpApiClient::new(
            self.base_url.clone().into(),
            self.api_key.clone(),
            self.timeout(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct UrlWrapper(Url);

impl<'de> Deserialize<'de> for UrlWrapper {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Url::parse(&String::deserialize(deserializer)?)
            .map_err(de::Error::custom)
            .map(UrlWrapper)
    }
}

impl From<UrlWrapper> for Url {
    fn from(wrapper: UrlWrapper) -> Self {
        wrapper.0
    }
}
