// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::ShutdownHandle;
use crate::config::AppState;
use crate::logger;

/// How long in-flight connections get to finish after shutdown is requested
const DRAIN_GRACE: Duration = Duration::from_secs(5);

/// Run the accept-and-serve loop until shutdown.
///
/// On shutdown the listening socket closes immediately (no new
/// connections), in-flight connections get `DRAIN_GRACE` to finish, and the
/// function returns so the process can exit 0.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownHandle>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => {
                logger::log_shutdown_requested();
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&active_connections).await;
    logger::log_shutdown_complete();
    Ok(())
}

/// Wait for the active-connection counter to reach zero, bounded by the
/// grace deadline.
async fn drain_connections(active: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + DRAIN_GRACE;
    loop {
        let remaining = active.load(Ordering::SeqCst);
        if remaining == 0 {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_shutdown_timeout(remaining);
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
