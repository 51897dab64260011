use std::time::Duration;

use crate::error::RelayResult;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the pooled HTTP client shared by all requests.
///
/// The overall deadline is enforced per call by [`super::UpstreamClient`];
/// here only connection setup is bounded.
pub fn build_http_client(request_timeout: Duration) -> RelayResult<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(request_timeout.min(MAX_CONNECT_TIMEOUT))
        .tcp_nodelay(true)
        .build()
        .map_err(Into::into)
}
