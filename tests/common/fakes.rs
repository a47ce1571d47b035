use origin_gate::{GateRequest, GateResponse, Headers};

/// In-memory request standing in for the hosting server's request type.
pub struct FakeRequest {
    method: String,
    headers: Vec<(String, String)>,
}

impl FakeRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl GateRequest for FakeRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// In-memory response capturing everything the gate writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl FakeResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Headers::default(),
            body: body.into(),
        }
    }
}

impl GateResponse for FakeResponse {
    fn with_status(status: u16) -> Self {
        Self::new(status, "")
    }

    fn insert_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }
}
