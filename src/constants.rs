use once_cell::sync::Lazy;

pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";
}

pub mod method {
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const OPTIONS: &str = "OPTIONS";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
    /// LIST is not an official HTTP method, but the service supports it.
    pub const LIST: &str = "LIST";
}

pub mod status {
    pub const OK: u16 = 200;
    pub const FORBIDDEN: u16 = 403;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
}

/// Methods a preflight may ask for. Case-sensitive and fixed at build time.
pub const ALLOWED_METHODS: [&str; 6] = [
    method::DELETE,
    method::GET,
    method::OPTIONS,
    method::POST,
    method::PUT,
    method::LIST,
];

/// `Access-Control-Allow-Methods` value, joined once per process.
pub static ALLOW_METHODS_VALUE: Lazy<String> = Lazy::new(|| ALLOWED_METHODS.join(","));

/// Headers attached to every granted preflight response.
pub const PREFLIGHT_HEADERS: [(&str, &str); 2] = [
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "*"),
    (header::ACCESS_CONTROL_MAX_AGE, "300"),
];
