//! Canonical path strings for the flat media index.
//!
//! Every path that enters the index or arrives with a request goes through
//! [`normalize`], so that equality and prefix checks between discovered
//! directories and browse queries are plain string operations. Windows-style
//! separators are folded into `/`; drive roots such as `D:` keep their short
//! form.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;

/// Folds `\` into `/` and strips trailing separators while more than two
/// characters remain (`D:/` becomes `D:`, `/` stays `/`). Repeated trailing
/// separators are all removed so that the function is idempotent.
pub fn normalize(raw: &str) -> String {
    let mut s = raw.replace('\\', "/");
    while s.len() > 2 && s.ends_with('/') {
        s.pop();
    }
    s
}

/// Last segment of a normalized file path.
pub fn file_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, name)) => name,
        None => path,
    }
}

/// Normalized parent directory of a normalized file path.
pub fn parent_dir(path: &str) -> String {
    match path.rsplit_once('/') {
        // "/a.mp4" lives directly in "/"
        Some(("", _)) => "/".to_string(),
        Some((dir, _)) => normalize(dir),
        None => String::new(),
    }
}

/// Display name of a directory: its final segment, or the whole string when
/// there is none (`D:`, `/`).
pub fn last_segment(dir: &str) -> &str {
    match dir.rsplit_once('/') {
        Some((_, seg)) if !seg.is_empty() => seg,
        _ => dir,
    }
}

/// First segment of a directory, i.e. the volume or top-level mount it lives on.
///
/// `D:/Movies` yields `D:`, `/D/Movies` yields `/D` and `//nas/share` yields
/// `//nas`. A directory without any named segment is its own root.
pub fn root_segment(dir: &str) -> &str {
    let body = dir.trim_start_matches('/');
    let lead = dir.len() - body.len();
    match body.find('/') {
        Some(idx) => &dir[..lead + idx],
        None => dir,
    }
}

fn with_separator(folder: &str) -> String {
    if folder.ends_with('/') {
        folder.to_string()
    } else {
        format!("{}/", folder)
    }
}

/// Whether `dir` lies strictly beneath `folder`.
pub fn is_under(dir: &str, folder: &str) -> bool {
    let prefix = with_separator(folder);
    dir.len() > prefix.len() && dir.starts_with(&prefix)
}

/// Whether `dir` is `folder` itself or lies beneath it.
pub fn is_within(dir: &str, folder: &str) -> bool {
    dir == folder || is_under(dir, folder)
}

/// The first segment of `dir` strictly below `folder`, if `dir` is under it.
pub fn child_segment<'a>(dir: &'a str, folder: &str) -> Option<&'a str> {
    let rest = dir.strip_prefix(&with_separator(folder))?;
    rest.split('/').next().filter(|seg| !seg.is_empty())
}

pub fn join(folder: &str, segment: &str) -> String {
    format!("{}{}", with_separator(folder), segment)
}

/// Reversible identifier for a normalized path (URL-safe, no padding).
pub fn encode_id(path: &str) -> String {
    URL_SAFE_NO_PAD.encode(path.as_bytes())
}

/// Inverse of [`encode_id`]. `None` for malformed ids.
pub fn decode_id(id: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(id.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
}

/// Navigation trail from the root segment down to `path` (inclusive).
/// The root view has no breadcrumbs.
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    if path.is_empty() {
        return Vec::new();
    }
    let root = root_segment(path);
    let mut crumbs = vec![Breadcrumb { name: root.to_string(), path: root.to_string() }];
    let mut current = root.to_string();
    let rest = path[root.len()..].trim_start_matches('/');
    for seg in rest.split('/').filter(|s| !s.is_empty()) {
        current = join(&current, seg);
        crumbs.push(Breadcrumb { name: seg.to_string(), path: current.clone() });
    }
    crumbs
}
