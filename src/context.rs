use crate::constants::header;
use crate::service::GateRequest;

/// Read-only projection of the inbound request fields the gate consults.
/// An empty string means the header was absent from the request.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: &'a str,
    pub access_control_request_method: &'a str,
}

impl<'a> RequestContext<'a> {
    pub fn from_request<R: GateRequest>(request: &'a R) -> Self {
        Self {
            method: request.method(),
            origin: request.header(header::ORIGIN).unwrap_or_default(),
            access_control_request_method: request
                .header(header::ACCESS_CONTROL_REQUEST_METHOD)
                .unwrap_or_default(),
        }
    }
}
