// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Shutdown handle shared between the signal task and the serve loop
pub struct ShutdownHandle {
    notify: Notify,
    requested: AtomicBool,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self {
            notify: Notify::new(),
            requested: AtomicBool::new(false),
        }
    }

    /// Request shutdown; wakes every waiter
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Resolve when shutdown has been requested
    ///
    /// The waiter is registered before the flag is checked, so a `request`
    /// landing in between cannot be missed.
    pub async fn wait(&self) {
        let mut notified = std::pin::pin!(self.notify.notified());
        notified.as_mut().enable();
        if self.is_requested() {
            return;
        }
        notified.await;
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the signal handler task (Unix)
///
/// SIGTERM and SIGINT both trigger a graceful shutdown: the serve loop stops
/// accepting, in-flight responses complete, and the process exits 0.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<ShutdownHandle>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                println!("\n[Signal] SIGTERM received, initiating graceful shutdown");
            }
            _ = sigint.recv() => {
                println!("\n[Signal] SIGINT received (Ctrl+C), initiating graceful shutdown");
            }
        }
        shutdown.request();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<ShutdownHandle>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[Signal] Ctrl+C received, initiating graceful shutdown");
            shutdown.request();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_request_wakes_waiter() {
        let handle = Arc::new(ShutdownHandle::new());
        let waiter = Arc::clone(&handle);
        let task = tokio::spawn(async move { waiter.wait().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.request();

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("waiter should wake")
            .expect("task should not panic");
        assert!(handle.is_requested());
    }

    #[tokio::test]
    async fn test_wait_after_request_returns_immediately() {
        let handle = ShutdownHandle::new();
        handle.request();
        tokio::time::timeout(Duration::from_millis(100), handle.wait())
            .await
            .expect("wait should return immediately");
    }
}
