//! Common test utilities and helpers

use std::path::Path;
use std::sync::{Arc, Mutex};

use turbostore::Client;
use turbostore::http::{HeaderMap, HttpProvider, Request, Response, StatusCode};

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Create a test API key
#[allow(dead_code)]
pub fn test_api_key() -> String {
    "sk-test-key-01234567890123456789012345678901234567890123456789".to_string()
}

/// Client pointed at a wiremock server, using the default provider
#[allow(dead_code)]
pub fn client_for(base_url: &str) -> Client {
    Client::builder()
        .api_key(test_api_key())
        .base_url(base_url)
        .build()
        .expect("Failed to build client")
}

/// Provider that replays canned responses in order and records every request
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct ScriptedProvider {
    responses: Mutex<Vec<(StatusCode, String)>>,
    requests: Mutex<Vec<Request>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn new(responses: Vec<(StatusCode, serde_json::Value)>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .rev()
                    .map(|(status, body)| (status, body.to_string()))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// URLs of every request seen so far
    pub fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url().to_string())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[turbostore::async_trait]
impl HttpProvider for ScriptedProvider {
    async fn execute(&self, request: Request) -> turbostore::Result<Response> {
        self.requests.lock().unwrap().push(request);
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .pop()
            .expect("provider ran out of scripted responses");
        Ok(Response::new(status, HeaderMap::new(), body))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}
