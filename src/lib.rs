//! # devserve
//!
//! A local static-file HTTP server for browsing a web application during
//! development: binds a port, serves files from a root directory, injects a
//! configured set of response headers (CORS by default), corrects MIME types
//! the system database gets wrong, and optionally opens the browser.
//!
//! Modules:
//! - `config`: configuration loading and immutable runtime state
//! - `server`: listener, accept loop, connections, graceful shutdown
//! - `handler`: request routing and static file resolution
//! - `http`: MIME detection and response building
//! - `browser`: best-effort browser auto-launch
//! - `logger`: startup, access, and error logging

pub mod browser;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
