//! Fail-fast connectivity and authorization probes

use crate::error::Result;
use crate::gateway::CloudGateway;
use serde_json::Value;

/// What the probes observed on success.
#[derive(Debug, Clone)]
pub struct Preflight {
    pub server_time: i64,
    pub identity: Value,
}

/// Confirm the API is reachable and the credential is authorized before
/// committing to resolution work.
///
/// Two pure reads with no side effects: the provider clock, then the
/// current identity. Failures propagate with the provider payload
/// unmodified; this layer does not reinterpret provider error codes.
pub async fn preflight(gateway: &dyn CloudGateway) -> Result<Preflight> {
    let server_time = gateway.server_time().await?;
    tracing::debug!(server_time, "API reachable");

    let identity = gateway.current_identity().await?;
    tracing::debug!("credential authorized");

    Ok(Preflight {
        server_time,
        identity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::MockGateway;

    #[tokio::test]
    async fn probes_run_clock_then_identity_and_nothing_else() {
        let gateway = MockGateway::default();

        let preflight = preflight(&gateway).await.unwrap();

        assert_eq!(preflight.server_time, 1_700_000_000);
        assert_eq!(preflight.identity["nichandle"], "tester");
        assert_eq!(gateway.calls(), vec!["time", "me"]);
    }
}
