const WILDCARD: &str = "*";

/// Checks if a change path matches a subscription pattern
///
/// Both are dot-separated (`section.key`). Segments are compared pairwise and
/// `*` matches any single segment. A pattern shorter than the path matches
/// everything below it, so `"server"` sees every key of that section. A
/// pattern longer than the path never matches.
///
/// # Arguments
/// * `path` - The path of the change
/// * `pattern` - The pattern to match against
///
/// # Examples
/// * `"server.port"` matches `"server.port"`
/// * `"server.port"` matches `"server.*"`
/// * `"server.port"` matches `"*"`
/// * `"server.port"` does not match `"client.*"`
/// * `"server.port"` does not match `"server.port.extra"`
pub(super) fn path_matches(path: &str, pattern: &str) -> bool {
    segments_match(path, pattern, 0)
}

/// Checks if the removal of a whole section matches a subscription pattern
///
/// Like [`path_matches`], but the pattern may name one extra segment, so a
/// subscriber to `"server.port"` hears that `"server"` was removed.
pub(super) fn section_matches(section: &str, pattern: &str) -> bool {
    segments_match(section, pattern, 1)
}

fn segments_match(path: &str, pattern: &str, extra_segments: usize) -> bool {
    if pattern == WILDCARD {
        return true;
    };

    if pattern.split('.').count() > path.split('.').count() + extra_segments {
        return false;
    }

    path.split('.')
        .zip(pattern.split('.'))
        .all(|(path_part, pattern_part)| pattern_part == WILDCARD || path_part == pattern_part)
}
