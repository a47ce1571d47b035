use std::future::Future;
use std::pin::Pin;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::http::StatusCode;
use hyper::http::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::service::Service;
use hyper::{Request, Response};
use origin_gate::constants::header;
use origin_gate::{GateDecision, Headers, RequestContext};

use super::SharedGate;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type GateBody = Full<Bytes>;

/// Hyper middleware that evaluates the origin gate before the router runs,
/// mirroring the pattern from the official "Getting Started with a Server
/// Middleware" guide: https://hyper.rs/guides/1/server/middleware/
#[derive(Clone)]
pub struct GateService<S> {
    inner: S,
    gate: SharedGate,
}

impl<S> GateService<S> {
    pub fn new(gate: SharedGate, inner: S) -> Self {
        Self { inner, gate }
    }
}

impl<S> Service<Request<Incoming>> for GateService<S>
where
    S: Service<Request<Incoming>, Response = Response<GateBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response<GateBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let owned_ctx = OwnedRequestContext::from_request(&req);
        let decision = self.gate.check(&owned_ctx.as_request_context());

        match decision {
            GateDecision::PassThrough => {
                let inner = self.inner.clone();
                Box::pin(async move { inner.call(req).await })
            }
            GateDecision::Forbidden => {
                Box::pin(async move { Ok(empty_response(StatusCode::FORBIDDEN)) })
            }
            GateDecision::MethodNotAllowed => {
                Box::pin(async move { Ok(empty_response(StatusCode::METHOD_NOT_ALLOWED)) })
            }
            GateDecision::PreflightGranted(headers) => {
                Box::pin(async move { Ok(preflight_response(headers)) })
            }
            GateDecision::Granted(headers) => {
                let inner = self.inner.clone();
                Box::pin(async move {
                    let mut response = inner.call(req).await?;
                    apply_headers(response.headers_mut(), &headers);
                    Ok(response)
                })
            }
        }
    }
}

fn empty_response(status: StatusCode) -> Response<GateBody> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .expect("failed to build empty response")
}

fn preflight_response(headers: Headers) -> Response<GateBody> {
    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(map) = builder.headers_mut() {
        apply_headers(map, &headers);
    }
    builder
        .body(Full::new(Bytes::new()))
        .expect("failed to build preflight response")
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers.iter() {
        if let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            map.insert(header_name, header_value);
        }
    }
}

struct OwnedRequestContext {
    method: String,
    origin: String,
    access_control_request_method: String,
}

impl OwnedRequestContext {
    fn from_request(request: &Request<Incoming>) -> Self {
        let headers = request.headers();

        Self {
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: &self.origin,
            access_control_request_method: &self.access_control_request_method,
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .unwrap_or_default()
}
