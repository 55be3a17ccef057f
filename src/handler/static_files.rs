//! Static file serving module
//!
//! Resolves request paths against the serving root and builds file,
//! redirect, and directory-listing responses.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Outcome of resolving a request path against the root
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    /// Serve this file's contents
    File(PathBuf),
    /// Directory requested without a trailing slash; redirect so relative
    /// links inside the listing resolve correctly
    Redirect(String),
    /// Index-less directory with listing enabled
    Listing(PathBuf),
}

/// Request paths that cannot be served
#[derive(Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// Path escapes the serving root (403)
    Traversal,
    /// Path does not exist, or is an index-less directory with listing
    /// disabled (404)
    NotFound,
}

/// Resolve a request path to a servable location.
///
/// `..` segments are rejected before any filesystem access, so a traversal
/// attempt never touches anything outside the root. Symlink escapes are
/// caught after canonicalization. `root` must already be canonical.
pub fn resolve_path(
    root: &Path,
    request_path: &str,
    index_files: &[String],
    directory_listing: bool,
) -> Result<Resolved, ResolveError> {
    let relative = request_path.trim_start_matches('/');

    if Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ResolveError::Traversal);
    }

    let Ok(resolved) = root.join(relative).canonicalize() else {
        return Err(ResolveError::NotFound);
    };

    // Symlinks inside the root may still point outside it
    if !resolved.starts_with(root) {
        return Err(ResolveError::Traversal);
    }

    if resolved.is_dir() {
        if !request_path.ends_with('/') {
            return Ok(Resolved::Redirect(format!("{request_path}/")));
        }

        for index_file in index_files {
            let index_path = resolved.join(index_file);
            if index_path.is_file() {
                return Ok(Resolved::File(index_path));
            }
        }

        if directory_listing {
            return Ok(Resolved::Listing(resolved));
        }
        return Err(ResolveError::NotFound);
    }

    Ok(Resolved::File(resolved))
}

/// Serve a request path from the configured root
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let serving = &state.config.serving;
    match resolve_path(
        &state.root,
        ctx.path,
        &serving.index_files,
        serving.directory_listing,
    ) {
        Ok(Resolved::File(path)) => serve_file(ctx, state, &path).await,
        Ok(Resolved::Redirect(target)) => http::build_redirect_response(&target),
        Ok(Resolved::Listing(dir)) => serve_listing(ctx, &dir).await,
        Err(ResolveError::Traversal) => {
            logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
            http::build_403_response()
        }
        Err(ResolveError::NotFound) => http::build_404_response(),
    }
}

async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    path: &Path,
) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::content_type_for(path, &state.config.mime.overrides);
            http::build_file_response(content, &content_type, ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {}", path.display(), e));
            http::build_500_response()
        }
    }
}

async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match render_listing(dir, ctx.path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {}",
                dir.display(),
                e
            ));
            http::build_500_response()
        }
    }
}

/// Render a deterministic HTML listing: entries sorted by name, directories
/// suffixed with `/`, names HTML-escaped.
pub async fn render_listing(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();

    let mut items = String::new();
    for name in &entries {
        let escaped = escape_html(name);
        items.push_str(&format!("        <li><a href=\"{escaped}\">{escaped}</a></li>\n"));
    }

    let title = escape_html(request_path);
    Ok(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>Directory listing for {title}</title>\n\
         </head>\n\
         <body>\n\
             <h1>Directory listing for {title}</h1>\n\
             <hr>\n\
             <ul>\n{items}        </ul>\n\
             <hr>\n\
         </body>\n\
         </html>\n"
    ))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FIXTURE_SEQ: AtomicUsize = AtomicUsize::new(0);

    /// Build a throwaway fixture tree under the system temp directory:
    /// index.html, assets/app.js, and an index-less empty/ directory.
    fn fixture_root() -> PathBuf {
        let seq = FIXTURE_SEQ.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "devserve-resolve-{}-{seq}",
            std::process::id()
        ));
        std_fs::create_dir_all(dir.join("assets")).expect("create fixture dirs");
        std_fs::create_dir_all(dir.join("empty")).expect("create fixture dirs");
        std_fs::write(dir.join("index.html"), "<html></html>").expect("write fixture");
        std_fs::write(dir.join("assets/app.js"), "console.log(1);").expect("write fixture");
        dir.canonicalize().expect("canonicalize fixture root")
    }

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string(), "index.htm".to_string()]
    }

    #[test]
    fn test_resolves_existing_file() {
        let root = fixture_root();
        let resolved = resolve_path(&root, "/assets/app.js", &index_files(), true)
            .expect("file should resolve");
        assert_eq!(resolved, Resolved::File(root.join("assets/app.js")));
    }

    #[test]
    fn test_rejects_parent_dir_segments() {
        let root = fixture_root();
        assert_eq!(
            resolve_path(&root, "/../outside.txt", &index_files(), true),
            Err(ResolveError::Traversal)
        );
        assert_eq!(
            resolve_path(&root, "/assets/../../outside.txt", &index_files(), true),
            Err(ResolveError::Traversal)
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let root = fixture_root();
        assert_eq!(
            resolve_path(&root, "/missing.css", &index_files(), true),
            Err(ResolveError::NotFound)
        );
    }

    #[test]
    fn test_directory_without_slash_redirects() {
        let root = fixture_root();
        assert_eq!(
            resolve_path(&root, "/assets", &index_files(), true),
            Ok(Resolved::Redirect("/assets/".to_string()))
        );
    }

    #[test]
    fn test_root_serves_index_file() {
        let root = fixture_root();
        assert_eq!(
            resolve_path(&root, "/", &index_files(), true),
            Ok(Resolved::File(root.join("index.html")))
        );
    }

    #[test]
    fn test_index_less_directory_listing_toggle() {
        let root = fixture_root();
        assert_eq!(
            resolve_path(&root, "/empty/", &index_files(), true),
            Ok(Resolved::Listing(root.join("empty")))
        );
        assert_eq!(
            resolve_path(&root, "/empty/", &index_files(), false),
            Err(ResolveError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_listing_is_sorted_and_escaped() {
        let root = fixture_root();
        std_fs::write(root.join("b<script>.txt"), "x").expect("write fixture");
        std_fs::write(root.join("a.txt"), "x").expect("write fixture");

        let html = render_listing(&root, "/").await.expect("listing renders");
        let a_pos = html.find("a.txt").expect("a.txt listed");
        let b_pos = html.find("b&lt;script&gt;.txt").expect("escaped name listed");
        assert!(a_pos < b_pos, "entries should be sorted by name");
        assert!(html.contains("assets/"), "directories get a trailing slash");
        assert!(!html.contains("<script>"), "names must be escaped");
    }
}
