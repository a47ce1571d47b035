use origin_gate::constants::method;
use origin_gate::{
    GateDecision, OriginGate, OriginPolicy, PolicyProvider, RequestContext, SharedPolicy,
};

pub struct GateBuilder {
    enabled: bool,
    origins: Vec<String>,
}

impl GateBuilder {
    pub fn new() -> Self {
        Self {
            enabled: true,
            origins: vec!["https://allowed.test".to_string()],
        }
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn wildcard(mut self) -> Self {
        self.origins = vec!["*".to_string()];
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn build(self) -> OriginGate<OriginPolicy> {
        let policy = if self.enabled {
            OriginPolicy::enabled(self.origins).expect("valid origin policy")
        } else {
            OriginPolicy::disabled()
        };
        OriginGate::new(policy)
    }

    /// Builds a gate backed by shared state, returning the administrative
    /// handle alongside it so tests can mutate the policy between requests.
    pub fn shared(self) -> (OriginGate<SharedPolicy>, SharedPolicy) {
        let policy = SharedPolicy::default();
        if self.enabled {
            policy.enable(self.origins).expect("valid origin policy");
        }
        (OriginGate::new(policy.clone()), policy)
    }
}

pub struct SimpleRequestBuilder {
    method: String,
    origin: Option<String>,
}

impl SimpleRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.to_string(),
            origin: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn check<P: PolicyProvider>(self, gate: &OriginGate<P>) -> GateDecision {
        let ctx = RequestContext {
            method: &self.method,
            origin: self.origin.as_deref().unwrap_or(""),
            access_control_request_method: "",
        };
        gate.check(&ctx)
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    origin: Option<String>,
    request_method: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn check<P: PolicyProvider>(self, gate: &OriginGate<P>) -> GateDecision {
        let ctx = RequestContext {
            method: method::OPTIONS,
            origin: self.origin.as_deref().unwrap_or(""),
            access_control_request_method: self.request_method.as_deref().unwrap_or(""),
        };
        gate.check(&ctx)
    }
}

pub fn gate() -> GateBuilder {
    GateBuilder::new()
}

pub fn simple_request() -> SimpleRequestBuilder {
    SimpleRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}
