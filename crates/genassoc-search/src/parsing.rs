//! Response parsing for `_search`.

use genassoc_core::SearchHits;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ElasticsearchError, ElasticsearchResult};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: Total,
    #[serde(default)]
    hits: Vec<Hit>,
}

/// `hits.total` is an object on 7.x and later, a bare number before.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Total {
    Tracked { value: u64 },
    Legacy(u64),
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Option<Value>,
}

/// Extract the total count and `_source` documents from a response.
pub fn parse_hits(body: Value) -> ElasticsearchResult<SearchHits> {
    let response: SearchResponse = serde_json::from_value(body)?;
    let total = match response.hits.total {
        Total::Tracked { value } | Total::Legacy(value) => value,
    };
    let documents = response
        .hits
        .hits
        .into_iter()
        .map(|hit| {
            hit.source.ok_or_else(|| ElasticsearchError::InvalidResponse {
                message: "hit without _source".to_string(),
            })
        })
        .collect::<ElasticsearchResult<Vec<_>>>()?;
    Ok(SearchHits { total, documents })
}

/// Summarise an error body as `type: reason` when it has the usual shape.
pub fn summarize_error(body: &str) -> String {
    let reason = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        let error = value.get("error")?;
        let kind = error.get("type").and_then(Value::as_str)?;
        let reason = error.get("reason").and_then(Value::as_str).unwrap_or_default();
        Some(format!("{kind}: {reason}"))
    });
    reason.unwrap_or_else(|| body.trim().lines().next().unwrap_or_default().to_string())
}
