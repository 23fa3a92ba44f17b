//! Helpers for bulk `IN (...)` lookups against SQLite.

/// Upper bound on ids bound into a single `IN (...)` predicate.
///
/// SQLite builds commonly cap host parameters at 999, and the query needs a
/// few slots for its other filters.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits an id list into slices that each fit one statement.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Sorted, duplicate-free copy of `ids`.
///
/// Sorting keeps chunks contiguous so per-chunk `ORDER BY object_id` results
/// concatenate in global order.
pub fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique
}
