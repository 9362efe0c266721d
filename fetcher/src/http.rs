//! Shared HTTP plumbing for manifest, metadata, and artifact requests.
//!
//! All network calls go through a single `ureq` agent configured with a
//! global request timeout. Certificate validation is left at its default;
//! endpoints with self-signed certificates need an explicit trust override
//! upstream rather than weakened verification here.

use std::sync::OnceLock;
use std::time::Duration;

use crate::error::{FetchError, Result};

/// Network timeout applied to every request made by the shared agent.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared `ureq` agent with request timeout configuration.
pub(crate) fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a `ureq` error to [`FetchError::Network`].
pub(crate) fn network_error(url: &str, err: &ureq::Error) -> FetchError {
    FetchError::Network {
        url: url.to_owned(),
        reason: err.to_string(),
    }
}

/// GET a URL and return the response body as text.
pub(crate) fn get_text(url: &str) -> Result<String> {
    log::debug!("GET {url}");
    let response = http_agent()
        .get(url)
        .call()
        .map_err(|e| network_error(url, &e))?;
    response
        .into_body()
        .read_to_string()
        .map_err(|e| FetchError::Network {
            url: url.to_owned(),
            reason: e.to_string(),
        })
}
