//! HTTP server startup with graceful shutdown.

mod error;

use std::future::{Future, IntoFuture};
use std::io;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

pub use self::error::{ServerError, ServerResult};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn serve(app: Router, config: &ServerConfig) -> ServerResult<()> {
    config
        .validate()
        .map_err(|err| ServerError::invalid_config(&err))?;

    let server_addr = config.server_addr();
    let listener = TcpListener::bind(server_addr).await.map_err(|source| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %source,
            "Failed to bind to address"
        );
        ServerError::bind_error(&server_addr.to_string(), source)
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        all_interfaces = config.binds_to_all_interfaces(),
        "Server is ready and listening for connections"
    );

    let drain = config.shutdown_timeout();
    let started = Instant::now();
    let signal = async move {
        let signal = wait_for_signal().await;
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            signal,
            drain_secs = drain.as_secs(),
            "Shutdown requested, draining open connections"
        );
    };

    match run_until(listener, app, drain, signal).await {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs = started.elapsed().as_secs(),
                "Server stopped"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                kind = ?err.kind(),
                uptime_secs = started.elapsed().as_secs(),
                "Server stopped unexpectedly"
            );
            Err(ServerError::Runtime(err))
        }
    }
}

/// Serves until `signal` resolves, then gives open connections at most
/// `drain` to finish before dropping them.
async fn run_until(
    listener: TcpListener,
    app: Router,
    drain: Duration,
    signal: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()> {
    let (signaled_tx, mut signaled_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = signaled_tx.send(true);
        })
        .into_future();

    let deadline = async move {
        if signaled_rx.wait_for(|signaled| *signaled).await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(drain).await;
    };

    tokio::select! {
        result = server => result,
        () = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                drain_secs = drain.as_secs(),
                "Drain window elapsed, dropping open connections"
            );
            Ok(())
        }
    }
}

/// Resolves with the name of the first termination signal received.
///
/// A handler that cannot be installed never fires, leaving the other one
/// in charge.
async fn wait_for_signal() -> &'static str {
    let interrupt = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                "Ctrl+C handler unavailable"
            );
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %error,
                    "SIGTERM handler unavailable"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::{Ipv4Addr, TcpStream};

    use axum::routing::get;
    use tokio::sync::oneshot;

    use super::*;

    async fn local_listener() -> anyhow::Result<TcpListener> {
        Ok(TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?)
    }

    #[tokio::test]
    async fn stops_once_signaled() -> anyhow::Result<()> {
        let listener = local_listener().await?;

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            run_until(listener, Router::new(), Duration::from_secs(1), async {}),
        )
        .await?;

        assert!(result.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn drain_window_bounds_stuck_requests() -> anyhow::Result<()> {
        let listener = local_listener().await?;
        let addr = listener.local_addr()?;
        let app = Router::new().route(
            "/stuck",
            get(|| async {
                std::future::pending::<()>().await;
                ""
            }),
        );

        let (signal_tx, signal_rx) = oneshot::channel::<()>();
        let signal = async move {
            let _ = signal_rx.await;
        };
        let server = tokio::spawn(run_until(
            listener,
            app,
            Duration::from_millis(200),
            signal,
        ));

        let mut client = TcpStream::connect(addr)?;
        client.write_all(b"GET /stuck HTTP/1.1\r\nHost: localhost\r\n\r\n")?;
        tokio::time::sleep(Duration::from_millis(200)).await;
        let _ = signal_tx.send(());

        let result = tokio::time::timeout(Duration::from_secs(5), server).await??;
        assert!(result.is_ok());
        drop(client);
        Ok(())
    }

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() -> anyhow::Result<()> {
        let taken = local_listener().await?;
        let config = ServerConfig {
            port: taken.local_addr()?.port(),
            ..ServerConfig::default()
        };

        let error = serve(Router::new(), &config).await.unwrap_err();
        assert!(matches!(error, ServerError::BindError { .. }));
        assert_eq!(error.error_code(), "E002");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_binding() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };

        let error = serve(Router::new(), &config).await.unwrap_err();
        assert!(matches!(error, ServerError::InvalidConfig(_)));
    }
}
