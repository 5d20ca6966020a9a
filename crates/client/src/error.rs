use std::fmt;

/// Why a single endpoint attempt failed. Transport failures and
/// application-level rejections are deliberately not distinguished by
/// the fallback loop — both mean "this URL failed".
#[derive(Debug)]
pub enum AttemptError {
    /// Could not reach the endpoint at all.
    Network(String),
    /// The endpoint answered with a non-success status.
    Http(u16, String),
    /// The endpoint answered but the body was not what we expected.
    Parse(String),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Network(msg) => write!(f, "network error: {}", msg),
            AttemptError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            AttemptError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for AttemptError {}

/// Every candidate URL for an operation failed.
///
/// Carries the full ordered attempted-URL list for diagnostics and the
/// error from the last attempt. Earlier errors were already logged and
/// are not kept — a simple message over complete forensics.
#[derive(Debug)]
pub struct EndpointsExhausted {
    pub tried: Vec<String>,
    pub last: AttemptError,
}

impl fmt::Display for EndpointsExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all endpoints failed ({})", self.last)?;
        write!(f, "\ntried:")?;
        for url in &self.tried {
            write!(f, "\n  {}", url)?;
        }
        Ok(())
    }
}

impl std::error::Error for EndpointsExhausted {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last)
    }
}
