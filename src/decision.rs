use crate::headers::Headers;

/// Outcome of evaluating one request against the current policy.
///
/// Exactly one variant is produced per request and it fully determines the
/// response: the gate either forwards to the downstream handler (optionally
/// annotating headers) or terminates the response itself, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Policy disabled or no `Origin` header present: forward untouched.
    PassThrough,
    /// Origin not allowed: terminate with 403, no body, no headers.
    Forbidden,
    /// Preflight asked for a method outside the allow list: terminate with 405.
    MethodNotAllowed,
    /// Successful preflight handshake: terminate with the granted headers.
    PreflightGranted(Headers),
    /// Origin allowed: forward and add the headers to the downstream response.
    Granted(Headers),
}
