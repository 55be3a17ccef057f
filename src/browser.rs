//! Browser auto-launch module
//!
//! Best-effort only: a failure to open the browser is logged and never
//! affects serving.

use crate::config::Config;
use crate::logger;

/// Open the default system browser at the server's URL, if configured.
///
/// Called after the listener is bound so the page has something to talk to.
pub fn open_if_configured(config: &Config) {
    if !config.browser.open {
        return;
    }

    let url = launch_url(config);
    match webbrowser::open(&url) {
        Ok(()) => logger::log_browser_opened(&url),
        Err(e) => logger::log_warning(&format!("Could not open browser at {url}: {e}")),
    }
}

/// The URL handed to the browser. A wildcard bind address is not routable
/// from a browser, so it becomes loopback.
pub fn launch_url(config: &Config) -> String {
    let host = if config.server.host == "0.0.0.0" || config.server.host == "::" {
        "127.0.0.1"
    } else {
        config.server.host.as_str()
    };
    format!("http://{}:{}{}", host, config.server.port, config.browser.open_path)
}
