/// A verified caller identity, as supplied by the authentication
/// collaborator in front of the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Opaque subject the credentials were resolved to.
    pub subject: String,
}

impl CallerIdentity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

/// The outcome of the transport-side authentication check.
///
/// The reporter treats this as a capability: `Authenticated` carries a
/// verified identity, `Anonymous` means no acceptable credentials were
/// presented. Verifying credentials happens upstream, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Authenticated(CallerIdentity),
    Anonymous,
}

impl Caller {
    /// Convenience constructor for an authenticated caller.
    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self::Authenticated(CallerIdentity::new(subject))
    }
}
