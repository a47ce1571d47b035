use indexmap::IndexSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use thiserror::Error;

const WILDCARD: &str = "*";

/// Errors raised while installing an allowed-origin set. Evaluation itself
/// never fails; these surface only at configuration time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("at least one origin or the wildcard must be provided")]
    EmptyOrigins,
    #[error("to allow all origins the wildcard must be the only value")]
    WildcardWithOthers,
}

/// Set of origins permitted to make cross-origin requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Wildcard marker: every origin is permitted.
    Any,
    /// Explicit allow list, matched by exact string comparison.
    List(IndexSet<String>),
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::List(IndexSet::new())
    }
}

impl AllowedOrigins {
    pub fn any() -> Self {
        Self::Any
    }

    /// Builds the allow list, collapsing a lone `"*"` entry into [`Self::Any`].
    pub fn list<I, S>(values: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let origins: IndexSet<String> = values.into_iter().map(Into::into).collect();

        if origins.is_empty() {
            return Err(PolicyError::EmptyOrigins);
        }
        if origins.contains(WILDCARD) {
            if origins.len() > 1 {
                return Err(PolicyError::WildcardWithOthers);
            }
            return Ok(Self::Any);
        }

        Ok(Self::List(origins))
    }

    pub fn contains(&self, origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(origins) => origins.contains(origin),
        }
    }
}

/// Read side of the policy the gate consults per request.
pub trait CorsPolicy {
    fn is_enabled(&self) -> bool;
    fn is_valid_origin(&self, origin: &str) -> bool;
}

/// Hands the gate a policy snapshot at request time. The snapshot is owned,
/// so a provider backed by shared state never holds a lock during evaluation
/// and a concurrent update is visible on the very next request.
pub trait PolicyProvider {
    type Policy: CorsPolicy;

    fn cors_config(&self) -> Self::Policy;
}

/// Enabled flag plus allowed-origin set governing cross-origin access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    enabled: bool,
    allowed_origins: AllowedOrigins,
}

impl OriginPolicy {
    /// Policy that is on from the start, validating `origins` up front.
    pub fn enabled<I, S>(origins: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            enabled: true,
            allowed_origins: AllowedOrigins::list(origins)?,
        })
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Installs a new allowed-origin set and turns the policy on. The current
    /// set is left untouched when validation fails.
    pub fn enable<I, S>(&mut self, origins: I) -> Result<(), PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = AllowedOrigins::list(origins)?;
        self.enabled = true;
        Ok(())
    }

    /// Turns the policy off and clears the allowed set.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.allowed_origins = AllowedOrigins::default();
    }

    pub fn allowed_origins(&self) -> &AllowedOrigins {
        &self.allowed_origins
    }
}

impl CorsPolicy for OriginPolicy {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_valid_origin(&self, origin: &str) -> bool {
        self.enabled && self.allowed_origins.contains(origin)
    }
}

impl PolicyProvider for OriginPolicy {
    type Policy = OriginPolicy;

    fn cors_config(&self) -> OriginPolicy {
        self.clone()
    }
}

/// Shared, runtime-mutable policy handle. Clones refer to the same state, so
/// one clone can live inside the gate while an administrative surface mutates
/// another.
#[derive(Debug, Clone, Default)]
pub struct SharedPolicy {
    inner: Arc<RwLock<OriginPolicy>>,
}

impl SharedPolicy {
    pub fn new(policy: OriginPolicy) -> Self {
        Self {
            inner: Arc::new(RwLock::new(policy)),
        }
    }

    /// Validates and installs `origins`, enabling the policy. On error the
    /// installed policy is unchanged.
    pub fn enable<I, S>(&self, origins: I) -> Result<(), PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed_origins = AllowedOrigins::list(origins)?;
        let mut policy = self.write();
        policy.allowed_origins = allowed_origins;
        policy.enabled = true;
        Ok(())
    }

    pub fn disable(&self) {
        self.write().disable();
    }

    pub fn replace(&self, policy: OriginPolicy) {
        *self.write() = policy;
    }

    fn write(&self) -> RwLockWriteGuard<'_, OriginPolicy> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PolicyProvider for SharedPolicy {
    type Policy = OriginPolicy;

    fn cors_config(&self) -> OriginPolicy {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
