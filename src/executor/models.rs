pub struct ExecutionResult {
    pub request: RequestSummary,
    pub response: ResponseSummary,
}

pub struct RequestSummary {
    pub method: String,
    pub url: String,
    pub body_bytes: Option<usize>,
}

pub struct ResponseSummary {
    pub status: u16,
    pub content_type: Option<String>,
    pub duration_ms: f64,
    pub body: Vec<u8>,
}
