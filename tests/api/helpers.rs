use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use fake::{faker::internet::en::SafeEmail, Fake, Faker};
use mailing_lists::{
    domain::{Subscriber, SubscriberEmail},
    telemetry, HttpApiClient, ListRepository,
};
use once_cell::sync::Lazy;
use reqwest::Url;
use secrecy::Secret;
use serde_json::{json, Value};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub static TELEMETRY: Lazy<Result<(), String>> = Lazy::new(|| {
    let (name, filter) = ("test", "debug");
    if std::env::var("TEST_LOG")
        .unwrap_or_default()
        .parse::<bool>()
        .unwrap_or_default()
    {
        telemetry::init(name, filter, std::io::stdout)
    } else {
        telemetry::init(name, filter, std::io::sink)
    }
});

pub const LIST_ID: &str = "abc123";

pub struct TestApp {
    pub repository: ListRepository<HttpApiClient>,
    pub api_server: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Lazy::force(&TELEMETRY)
            .as_ref()
            .expect("Failed to initialize telemetry");

        let api_server = MockServer::start().await;
        let client = HttpApiClient::new(
            Url::parse(&format!("{}/3.0", api_server.uri())).unwrap(),
            Secret::new(Faker.fake()),
            Duration::from_millis(500),
        )
        .expect("Failed to build the API client");
        Self {
            repository: ListRepository::new(client),
            api_server,
        }
    }

    pub async fn received_requests(&self) -> Vec<Request> {
        self.api_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
    }
}

pub fn api_path(path: &str) -> String {
    format!("/3.0/{}", path)
}

pub fn random_email() -> SubscriberEmail {
    SubscriberEmail::try_from(SafeEmail().fake::<String>()).unwrap()
}

pub fn subscribers(n: usize) -> Vec<Subscriber> {
    (0..n)
        .map(|i| {
            let email = SubscriberEmail::try_from(format!("member{}@example.com", i)).unwrap();
            Subscriber::new(email).with_merge_field("FNAME", format!("Member {}", i))
        })
        .collect()
}

pub fn json_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("Request body is not JSON")
}

pub fn api_error(status: u16, detail: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "type": "https://mailchimp.com/developer/marketing/docs/errors/",
        "title": "Bad Request",
        "status": status,
        "detail": detail,
    }))
}

/// Hands out `job-0`, `job-1`, ... to successive batch submissions.
#[derive(Default)]
pub struct SequentialBatchIds(AtomicUsize);

impl Respond for SequentialBatchIds {
    fn respond(&self, _: &Request) -> ResponseTemplate {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        ResponseTemplate::new(200).set_body_json(json!({
            "id": format!("job-{}", n),
            "status": "pending",
            "total_operations": 0,
            "finished_operations": 0,
            "errored_operations": 0,
        }))
    }
}
