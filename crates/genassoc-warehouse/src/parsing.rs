//! Response body parsing.

use genassoc_core::Row;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClickHouseError, ClickHouseResult};

/// Longest server message kept in errors.
const MAX_MESSAGE_LEN: usize = 512;

/// The parts of a `JSONCompact` document the client reads.
#[derive(Debug, Deserialize)]
struct CompactResponse {
    data: Vec<Vec<Value>>,
}

/// Parse a `JSONCompact` body into positional rows.
pub fn parse_compact_rows(body: &str) -> ClickHouseResult<Vec<Row>> {
    if body.trim().is_empty() {
        return Err(ClickHouseError::InvalidResponse {
            message: "empty response body".to_string(),
        });
    }
    let response: CompactResponse = serde_json::from_str(body)?;
    Ok(response.data.into_iter().map(Row::new).collect())
}

/// Reduce a server exception body to its first line, bounded in length.
pub fn summarize_exception(body: &str) -> String {
    let first_line = body.trim().lines().next().unwrap_or_default();
    if first_line.len() <= MAX_MESSAGE_LEN {
        return first_line.to_string();
    }
    let mut end = MAX_MESSAGE_LEN;
    while !first_line.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &first_line[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_rows() {
        let body = r#"{
            "meta": [{"name": "study_id", "type": "String"}, {"name": "n", "type": "UInt64"}],
            "data": [["GCST1", 10], ["GCST2", null]],
            "rows": 2,
            "statistics": {"elapsed": 0.001, "rows_read": 2, "bytes_read": 64}
        }"#;
        let rows = parse_compact_rows(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].string(0).unwrap(), "GCST1");
        assert_eq!(rows[0].u64(1).unwrap(), 10);
        assert_eq!(rows[1].opt_u64(1).unwrap(), None);
    }

    #[test]
    fn test_parse_empty_result() {
        let rows = parse_compact_rows(r#"{"meta": [], "data": [], "rows": 0}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_compact_bodies() {
        assert!(matches!(
            parse_compact_rows("   "),
            Err(ClickHouseError::InvalidResponse { .. })
        ));
        assert!(matches!(
            parse_compact_rows(r#"{"rows": 0}"#),
            Err(ClickHouseError::JsonParse(_))
        ));
        assert!(parse_compact_rows("1\t2\n").is_err());
    }

    #[test]
    fn test_summarize_exception() {
        let body = "Code: 60. DB::Exception: Table ot.v2g doesn't exist. (UNKNOWN_TABLE)\nStack trace:\n0. ...";
        assert_eq!(
            summarize_exception(body),
            "Code: 60. DB::Exception: Table ot.v2g doesn't exist. (UNKNOWN_TABLE)"
        );

        let long = "x".repeat(2_000);
        assert_eq!(summarize_exception(&long).len(), MAX_MESSAGE_LEN + 3);
        assert_eq!(summarize_exception(""), "");
    }
}
