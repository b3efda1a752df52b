//! HTML directory listings for directories without an `index.html`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::{debug, warn};

/// Characters escaped in listing links. Unreserved URI characters stay as they are.
const LINK_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Fallback for paths the file service could not answer.
///
/// Lists the directory when the path names one inside `root`; anything else is
/// a 404.
pub async fn list_directory(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let request_path = match percent_decode_str(uri.path()).decode_utf8() {
        Ok(path) => path.into_owned(),
        Err(_) => return (StatusCode::BAD_REQUEST, "Bad request path").into_response(),
    };

    let Some(relative) = confined_path(&request_path) else {
        return not_found();
    };
    let dir = root.join(relative);

    let is_dir = tokio::fs::metadata(&dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        debug!(path = %request_path, "not found");
        return not_found();
    }

    if !request_path.ends_with('/') {
        return Redirect::temporary(&format!("{}/", uri.path())).into_response();
    }

    match read_entries(&dir).await {
        Ok(entries) => Html(render_listing(&request_path, &entries)).into_response(),
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot list directory");
            (StatusCode::NOT_FOUND, "No permission to list directory").into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// Maps a decoded URL path to a path relative to the served root.
///
/// Returns `None` for anything that could escape the root.
pub fn confined_path(request_path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in request_path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains('\\') || s.contains('\0') || Path::new(s).has_root() => return None,
            s => relative.push(s),
        }
    }
    Some(relative)
}

/// Reads `dir`, sorted case-insensitively by name.
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    entries.sort_by_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Renders the listing page for `display_path`.
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n</head>\n<body>\n", title));
    html.push_str(&format!("<h1>{}</h1>\n<hr>\n<ul>\n", title));

    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}{}\">{}{}</a></li>\n",
            utf8_percent_encode(&entry.name, LINK_ESCAPE),
            suffix,
            escape_html(&entry.name),
            suffix
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}
