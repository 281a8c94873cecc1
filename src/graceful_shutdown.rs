use tokio::signal;

/// Resolves when the process is asked to stop: ctrl-c anywhere, SIGTERM on
/// unix (what container runtimes send).
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        let mut sigterm = match unix_signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(err) => {
                tracing::error!("SIGTERM handler unavailable: {err}");
                wait_for_ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = signal::ctrl_c() => tracing::info!("ctrl-c received, shutting down"),
            _ = sigterm.recv() => tracing::info!("SIGTERM received, shutting down"),
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("ctrl-c received, shutting down"),
        Err(err) => {
            tracing::error!("ctrl-c handler unavailable: {err}");
            std::future::pending::<()>().await;
        }
    }
}
