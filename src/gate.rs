use crate::constants::{ALLOW_METHODS_VALUE, ALLOWED_METHODS, PREFLIGHT_HEADERS, header, method, status};
use crate::context::RequestContext;
use crate::decision::GateDecision;
use crate::headers::{HeaderCollection, Headers};
use crate::policy::{CorsPolicy, PolicyProvider};
use crate::service::{DownstreamHandler, GateRequest, GateResponse};

/// Request-intercepting filter that classifies each request against the
/// provider's current policy before it reaches the downstream handler.
///
/// The gate is stateless per request: every [`check`](OriginGate::check)
/// reads a fresh policy snapshot, so a policy change takes effect on the
/// very next request.
pub struct OriginGate<P> {
    provider: P,
}

impl<P: PolicyProvider> OriginGate<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Runs the ordered decision chain for one request.
    pub fn check(&self, request: &RequestContext<'_>) -> GateDecision {
        let policy = self.provider.cors_config();

        // No Origin header means a non-browser client (a browser always
        // sends one); such requests are exempt, as is everything while the
        // policy is off.
        if !policy.is_enabled() || request.origin.is_empty() {
            return GateDecision::PassThrough;
        }

        // Reject disallowed origins before any header is built and before
        // the preflight method is examined.
        if !policy.is_valid_origin(request.origin) {
            return GateDecision::Forbidden;
        }

        let preflight = request.method == method::OPTIONS;
        if preflight && !ALLOWED_METHODS.contains(&request.access_control_request_method) {
            return GateDecision::MethodNotAllowed;
        }

        // Echo the concrete origin, never a wildcard, and make caches key
        // on it.
        let mut headers = HeaderCollection::new();
        headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, request.origin);
        headers.add_vary(header::ORIGIN);

        if preflight {
            headers.push(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                ALLOW_METHODS_VALUE.as_str(),
            );
            for (name, value) in PREFLIGHT_HEADERS {
                headers.push(name, value);
            }
            GateDecision::PreflightGranted(headers.into_headers())
        } else {
            GateDecision::Granted(headers.into_headers())
        }
    }

    /// Evaluates `request` and either forwards it to `downstream` or
    /// terminates with the status the decision dictates. A successful
    /// preflight never reaches downstream; it is purely a permission
    /// handshake.
    pub fn handle<Req, D>(&self, request: Req, downstream: D) -> D::Response
    where
        Req: GateRequest,
        D: DownstreamHandler<Req>,
    {
        let decision = self.check(&RequestContext::from_request(&request));

        match decision {
            GateDecision::PassThrough => downstream.respond(request),
            GateDecision::Forbidden => D::Response::with_status(status::FORBIDDEN),
            GateDecision::MethodNotAllowed => D::Response::with_status(status::METHOD_NOT_ALLOWED),
            GateDecision::PreflightGranted(headers) => {
                let mut response = D::Response::with_status(status::OK);
                apply_headers(&mut response, &headers);
                response
            }
            GateDecision::Granted(headers) => {
                let mut response = downstream.respond(request);
                apply_headers(&mut response, &headers);
                response
            }
        }
    }
}

fn apply_headers<R: GateResponse>(response: &mut R, headers: &Headers) {
    for (name, value) in headers {
        response.insert_header(name, value);
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;
