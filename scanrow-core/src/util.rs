/// Query text cut to a size that fits in a log line or an error context.
#[macro_export]
macro_rules! printable_query {
    ($query:expr) => {{
        let query: &str = $query;
        let end = query
            .char_indices()
            .map(|(i, _)| i)
            .nth(497)
            .unwrap_or(query.len());
        format!(
            "{}{}",
            query[..end].trim_end(),
            if end < query.len() { "..." } else { "" }
        )
    }};
}

/// Drops the first `len` bytes, unless the input is not longer than that.
pub(crate) fn strip_prefix(bytes: &[u8], len: usize) -> &[u8] {
    if bytes.len() > len { &bytes[len..] } else { bytes }
}
