//! Description of one outbound provider call

use gifte_core::ProviderKind;
use serde_json::Value;

/// HTTP method of a provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Everything needed to perform one provider lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, sent only with `Post`
    pub body: Option<Value>,
}

impl ProviderSpec {
    pub fn get(kind: ProviderKind, url: String) -> Self {
        Self {
            kind,
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(kind: ProviderKind, url: String, body: Value) -> Self {
        Self {
            kind,
            method: HttpMethod::Post,
            url,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}
