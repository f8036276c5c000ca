//! Derives a folder view from the flat media index.
//!
//! Nothing here is cached: every listing walks the (filtered) record set and
//! synthesizes [`FolderNode`]s from string prefixes of `MediaRecord::directory`.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::index::IndexSnapshot;
use crate::paths;
use crate::types::{BrowseItem, FolderNode, MediaKind, MediaRecord};

/// A filtered view over one index snapshot.
///
/// The type filter is applied before anything is derived: folders without a
/// descendant of the filtered kind do not appear, and counts only include the
/// filtered kind.
pub struct Hierarchy<'a> {
    records: Vec<&'a MediaRecord>,
}

impl<'a> Hierarchy<'a> {
    pub fn new(snapshot: &'a IndexSnapshot, kind: Option<MediaKind>) -> Self {
        Self { records: snapshot.filtered(kind) }
    }

    pub fn from_records(records: Vec<&'a MediaRecord>) -> Self {
        Self { records }
    }

    /// Immediate children of `prefix`; an empty prefix lists the roots.
    pub fn list(&self, prefix: &str) -> Vec<BrowseItem> {
        let mut items = if prefix.is_empty() { self.roots() } else { self.children(prefix) };
        sort_items(&mut items);
        items
    }

    /// One node per distinct root segment. Every record belongs to exactly one
    /// root, so `/` next to `/D` or `//nas` only counts the files directly in `/`.
    fn roots(&self) -> Vec<BrowseItem> {
        let mut order = Vec::new();
        let mut groups: HashMap<&str, Vec<&MediaRecord>> = HashMap::new();
        for &rec in &self.records {
            let root = paths::root_segment(&rec.directory);
            if root.is_empty() {
                continue;
            }
            groups
                .entry(root)
                .or_insert_with(|| {
                    order.push(root);
                    Vec::new()
                })
                .push(rec);
        }
        order
            .into_iter()
            .map(|root| BrowseItem::Folder(aggregate(root, root, &groups[root], |_| true)))
            .collect()
    }

    fn children(&self, prefix: &str) -> Vec<BrowseItem> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for &rec in &self.records {
            if rec.directory == prefix {
                items.push(BrowseItem::File(rec.clone()));
            } else if let Some(seg) = paths::child_segment(&rec.directory, prefix) {
                if seen.insert(seg) {
                    let path = paths::join(prefix, seg);
                    items.push(BrowseItem::Folder(self.folder_node(&path, seg)));
                }
            }
        }
        items
    }

    /// Aggregate for `path`: recursive per-kind counts plus distinct immediate subfolders.
    pub fn folder_node(&self, path: &str, name: &str) -> FolderNode {
        aggregate(path, name, &self.records, |r| paths::is_within(&r.directory, path))
    }

    pub fn subfolder_count(&self, folder: &str) -> u64 {
        subfolders(folder, &self.records)
    }
}

fn aggregate(
    path: &str,
    name: &str,
    records: &[&MediaRecord],
    inside: impl Fn(&MediaRecord) -> bool,
) -> FolderNode {
    let (mut video_count, mut audio_count) = (0u64, 0u64);
    for rec in records.iter().filter(|r| inside(**r)) {
        match rec.kind {
            MediaKind::Video => video_count += 1,
            MediaKind::Audio => audio_count += 1,
        }
    }
    FolderNode {
        path: path.to_string(),
        name: name.to_string(),
        video_count,
        audio_count,
        subfolder_count: subfolders(path, records),
    }
}

fn subfolders(folder: &str, records: &[&MediaRecord]) -> u64 {
    records
        .iter()
        .filter_map(|r| paths::child_segment(&r.directory, folder))
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Folders first, then by name. The sort is stable, so identical names keep
/// their encounter order.
pub fn sort_items(items: &mut [BrowseItem]) {
    items.sort_by_cached_key(|item| (!item.is_folder(), collation_key(item.name()), item.name().to_string()));
}

/// Locale-style name order: base letters first (`Ärger` sorts with `arger`,
/// `Émile` with `emile`), then accents and case, code point order last.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b)).then_with(|| a.cmp(b))
}

/// (base letters, lowercase with accents). `ß` folds to `ss`.
pub fn collation_key(name: &str) -> (String, String) {
    let lower = name.to_lowercase();
    let base = lower
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| match c {
            'ß' => ['s', 's'].into_iter().take(2),
            c => [c, c].into_iter().take(1),
        })
        .collect();
    (base, lower)
}
