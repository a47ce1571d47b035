pub mod constants;

mod context;
mod decision;
mod gate;
mod headers;
mod policy;
mod service;

pub use context::RequestContext;
pub use decision::GateDecision;
pub use gate::OriginGate;
pub use headers::Headers;
pub use policy::{
    AllowedOrigins, CorsPolicy, OriginPolicy, PolicyError, PolicyProvider, SharedPolicy,
};
pub use service::{DownstreamHandler, GateRequest, GateResponse};
