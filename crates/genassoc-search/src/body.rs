//! Request body construction for `_search`.

use genassoc_core::{SearchClause, SearchRequest};
use serde_json::{Map, Value, json};

fn clause_to_json(clause: &SearchClause) -> Value {
    match clause {
        SearchClause::Prefix { field, value } => {
            let mut prefix = Map::new();
            prefix.insert(
                field.clone(),
                json!({ "value": value, "case_insensitive": true }),
            );
            json!({ "prefix": prefix })
        }
        SearchClause::FreeText { fields, query } => json!({
            "simple_query_string": {
                "query": query,
                "fields": fields,
                "default_operator": "AND"
            }
        }),
    }
}

/// Build the `_search` body for `request`.
///
/// A document matches when at least one clause matches.
pub fn search_body(request: &SearchRequest) -> Value {
    let should: Vec<Value> = request.should.iter().map(clause_to_json).collect();
    json!({
        "from": request.window.from,
        "size": request.window.size,
        "track_total_hits": true,
        "query": {
            "bool": {
                "should": should,
                "minimum_should_match": 1
            }
        }
    })
}
