use std::future::Future;
use std::io;
use tracing::{error, info};

/// Resolves when ctrl-c is received.
pub async fn ctrl_c() {
    wait_for(tokio::signal::ctrl_c()).await;
}

/// Resolves when `signal` fires. If the listener cannot be installed the
/// server keeps running instead of shutting down immediately.
pub async fn wait_for<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::wait_for;
    use std::io;
    use std::time::Duration;

    #[tokio::test]
    async fn signal_resolves_shutdown() {
        tokio::time::timeout(Duration::from_millis(100), wait_for(async { Ok(()) }))
            .await
            .expect("shutdown after signal");
    }

    #[tokio::test]
    async fn listener_failure_keeps_serving() {
        let failing = async { Err(io::Error::other("no signal support")) };
        let outcome = tokio::time::timeout(Duration::from_millis(50), wait_for(failing)).await;
        assert!(outcome.is_err(), "shutdown must not fire on listener error");
    }
}
