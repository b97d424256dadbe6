// ── Core error types ──
//
// User-facing errors from nmctl-core. Reconcilers never see HTTP status
// codes directly: "not found" is already an `Option::None` by the time it
// gets here, and the `From<nmctl_api::Error>` impl translates every other
// transport failure.

use thiserror::Error;

use crate::desired::ResourceType;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Gateway resolution ───────────────────────────────────────────
    #[error("No nodes found in network '{network}'")]
    NoNodes { network: String },

    #[error("No ingress gateway found in network '{network}'")]
    NoIngressGateway { network: String },

    // ── Preconditions ────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    // ── Invocation context ───────────────────────────────────────────
    /// Any of the above, tagged with the resource being reconciled.
    #[error("Error managing {resource_type} '{name}': {cause}")]
    Managing {
        resource_type: ResourceType,
        name: String,
        cause: Box<CoreError>,
    },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Tag this error with the resource it concerns. Already-tagged errors
    /// are returned unchanged.
    pub fn managing(self, resource_type: ResourceType, name: impl Into<String>) -> Self {
        match self {
            tagged @ Self::Managing { .. } => tagged,
            cause => Self::Managing {
                resource_type,
                name: name.into(),
                cause: Box::new(cause),
            },
        }
    }

    /// The underlying error, looking through [`Managing`](Self::Managing).
    pub fn root(&self) -> &Self {
        match self {
            Self::Managing { cause, .. } => cause.root(),
            other => other,
        }
    }

    /// True for failures detected before any network call.
    pub fn is_precondition(&self) -> bool {
        matches!(self.root(), Self::ValidationFailed { .. })
    }

    /// True when automatic gateway selection found nothing usable.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self.root(),
            Self::NoNodes { .. } | Self::NoIngressGateway { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<nmctl_api::Error> for CoreError {
    fn from(err: nmctl_api::Error) -> Self {
        match err {
            nmctl_api::Error::Authentication { message } => Self::AuthenticationFailed { message },
            nmctl_api::Error::Transport(ref e) if e.is_timeout() || e.is_connect() => {
                Self::ConnectionFailed {
                    url: e.url().map(ToString::to_string).unwrap_or_default(),
                    reason: e.to_string(),
                }
            }
            nmctl_api::Error::Deserialization { message, .. } => {
                Self::UnexpectedResponse { message }
            }
            other => Self::Api {
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managing_prefixes_resource_and_name() {
        let err = CoreError::NoIngressGateway {
            network: "iot".into(),
        }
        .managing(ResourceType::Extclient, "sensor-01");

        assert_eq!(
            err.to_string(),
            "Error managing extclient 'sensor-01': No ingress gateway found in network 'iot'"
        );
        assert!(err.is_resolution());
        assert!(!err.is_precondition());
    }

    #[test]
    fn managing_is_not_applied_twice() {
        let err = CoreError::validation("network is required")
            .managing(ResourceType::Extclient, "a")
            .managing(ResourceType::Network, "b");
        assert!(err.to_string().starts_with("Error managing extclient 'a'"));
    }

    #[test]
    fn api_errors_keep_remote_message() {
        let api = nmctl_api::Error::Api {
            status: 400,
            url: "https://nm/api/networks".into(),
            message: Some("network already exists".into()),
        };
        let core = CoreError::from(api);
        assert!(matches!(core, CoreError::Api { status: Some(400), .. }));
        assert!(core.to_string().ends_with(" - network already exists"));
    }
}
