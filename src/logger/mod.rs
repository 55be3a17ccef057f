//! Logger module
//!
//! Provides logging utilities for the development server: startup banner,
//! access logging, warnings and errors. Output goes to stdout/stderr.

mod format;

pub use format::AccessLogEntry;

use crate::config::AppState;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    println!("======================================");
    println!("Development server started");
    println!("Listening on: http://{addr}");
    println!("Serving from: {}", state.root.display());
    println!("Log level: {}", state.config.logging.level);
    if let Some(workers) = state.config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Press Ctrl+C to stop");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        println!("[Headers] Count: {count}");
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    eprintln!("[ERROR] Failed to bind {addr}: {err}");
    eprintln!("        Is another server already running on this port?");
}

pub fn log_browser_opened(url: &str) {
    println!("[Browser] Opened {url}");
}

pub fn log_shutdown_requested() {
    println!("\n[Shutdown] Stop signal received, no longer accepting connections");
}

pub fn log_shutdown_complete() {
    println!("[Shutdown] All connections closed, goodbye");
}

pub fn log_shutdown_timeout(remaining: usize) {
    eprintln!("[WARN] Shutdown grace period elapsed with {remaining} connection(s) still open");
}
