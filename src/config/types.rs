// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub serving: ServingConfig,
    #[serde(default)]
    pub headers: HeadersConfig,
    #[serde(default)]
    pub mime: MimeConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined or common)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

/// Static file serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServingConfig {
    /// Directory below which all servable files must reside
    #[serde(default = "default_root")]
    pub root: String,
    /// Index files probed, in order, when a directory is requested
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
    /// Serve a generated listing for index-less directories (404 when off)
    #[serde(default = "default_directory_listing")]
    pub directory_listing: bool,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

#[allow(clippy::missing_const_for_fn)]
fn default_directory_listing() -> bool {
    true
}

impl Default for ServingConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            index_files: default_index_files(),
            directory_listing: default_directory_listing(),
        }
    }
}

/// A single response header, applied verbatim
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HeaderPair {
    pub name: String,
    pub value: String,
}

impl HeaderPair {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Extra response headers, attached to every response in configuration order
///
/// The default profile is the CORS set for local development. A cache-busting
/// profile is a one-section change in `config.toml`:
///
/// ```toml
/// [[headers.extra]]
/// name = "Cache-Control"
/// value = "no-cache"
/// ```
#[derive(Debug, Deserialize, Clone)]
pub struct HeadersConfig {
    #[serde(default = "default_extra_headers")]
    pub extra: Vec<HeaderPair>,
}

fn default_extra_headers() -> Vec<HeaderPair> {
    vec![
        HeaderPair::new("Access-Control-Allow-Origin", "*"),
        HeaderPair::new("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        HeaderPair::new("Access-Control-Allow-Headers", "Content-Type"),
    ]
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            extra: default_extra_headers(),
        }
    }
}

/// MIME override configuration
///
/// Overrides are consulted before the built-in extension table. The defaults
/// pin `js` and `css`, which system MIME databases sometimes resolve wrong.
#[derive(Debug, Deserialize, Clone)]
pub struct MimeConfig {
    #[serde(default = "default_mime_overrides")]
    pub overrides: HashMap<String, String>,
}

fn default_mime_overrides() -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    overrides.insert("js".to_string(), "application/javascript".to_string());
    overrides.insert("css".to_string(), "text/css".to_string());
    overrides
}

impl Default for MimeConfig {
    fn default() -> Self {
        Self {
            overrides: default_mime_overrides(),
        }
    }
}

/// Browser auto-launch configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    #[serde(default = "default_browser_open")]
    pub open: bool,
    #[serde(default = "default_open_path")]
    pub open_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_browser_open() -> bool {
    true
}

fn default_open_path() -> String {
    "/".to_string()
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            open: default_browser_open(),
            open_path: default_open_path(),
        }
    }
}
