use std::sync::Arc;

use origin_gate::{OriginGate, PolicyError, SharedPolicy};

pub type SharedGate = Arc<OriginGate<SharedPolicy>>;
pub type SharedAppState = Arc<AppState>;

pub struct AppState {
    pub gate: SharedGate,
    pub policy: SharedPolicy,
}

pub fn build_state() -> Result<SharedAppState, PolicyError> {
    let policy = SharedPolicy::default();
    policy.enable(["http://localhost:8080", "https://app.example"])?;

    let gate = Arc::new(OriginGate::new(policy.clone()));

    Ok(Arc::new(AppState { gate, policy }))
}

pub mod middleware;
