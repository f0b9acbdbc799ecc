/// Terminal result of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The record is live; send the client to `url`.
    Redirect { url: String },
    /// The record exists but its deadline has passed.
    Expired,
    /// No record is stored under the code.
    NotFound,
    /// The request path does not contain a usable code.
    InvalidCode,
}

impl ResolveOutcome {
    pub fn is_redirect(&self) -> bool {
        matches!(self, ResolveOutcome::Redirect { .. })
    }
}
