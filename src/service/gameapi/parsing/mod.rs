pub mod league;
pub mod summoner;

#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    #[error("invalid {context} payload: {source}")]
    InvalidPayload {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// Clamps an optional upstream counter into the non-negative range.
pub(crate) fn non_negative(value: Option<i64>) -> u32 {
    value.map_or(0, |v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
}
