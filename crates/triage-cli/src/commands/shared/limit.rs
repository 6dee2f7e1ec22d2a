/// Effective ranked-list length: the global `--limit` flag, else the config value.
#[must_use]
pub fn effective_limit(flag: Option<u32>, fallback: usize) -> usize {
    flag.map_or(fallback, |limit| usize::try_from(limit).unwrap_or(usize::MAX))
}
