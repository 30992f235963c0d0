/// Row limit: the `--limit` flag, else the configured default.
#[must_use]
pub fn effective_limit(flag: Option<u32>, fallback: u32) -> u32 {
    flag.unwrap_or(fallback)
}

/// Keep at most `limit` rows.
pub fn truncate_to<T>(rows: &mut Vec<T>, limit: u32) {
    rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
}
