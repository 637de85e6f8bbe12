// Path helpers shared by the storage backends

/// Directory form of `path` (trailing slash) as OpenDAL expects for listing.
pub fn as_dir_path(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Compare two remote paths ignoring leading and trailing slashes.
pub fn same_path(a: &str, b: &str) -> bool {
    a.trim_matches('/') == b.trim_matches('/')
}

/// Final segment of a path, ignoring a trailing slash.
pub fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Whether `entry` lives strictly below `dir`.
pub fn is_child_of(entry: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    entry
        .strip_prefix(dir)
        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('/'))
}

/// Number of path segments, used to delete the deepest entries first.
pub fn depth(path: &str) -> usize {
    path.trim_matches('/').split('/').filter(|s| !s.is_empty()).count()
}
