//! URL construction for ClickHouse HTTP queries.
//!
//! Settings and bound parameters are carried in the query string; the query
//! text itself travels in the request body.

use genassoc_core::{Query, QueryParam};
use url::Url;

/// Settings attached to every query.
const QUERY_SETTINGS: &[(&str, &str)] = &[
    ("default_format", "JSONCompact"),
    ("output_format_json_quote_64bit_integers", "0"),
    ("output_format_json_quote_denormals", "1"),
];

/// Escape a value for ClickHouse's escaped text format, which is how
/// `param_*` values are parsed.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render an array of strings as a ClickHouse literal: `['a','b\'c']`.
fn array_literal(values: &[String]) -> String {
    let items = values
        .iter()
        .map(|value| format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect::<Vec<_>>()
        .join(",");
    escape_text(&format!("[{items}]"))
}

/// Text form of a bound parameter value.
pub fn param_value(param: &QueryParam) -> String {
    match param {
        QueryParam::String(value) => escape_text(value),
        QueryParam::UInt64(value) => value.to_string(),
        QueryParam::StringArray(values) => array_literal(values),
    }
}

/// Build the URL for one query: settings, optional database, then one
/// `param_<name>` argument per bound parameter.
pub fn build_query_url(base_url: &Url, database: Option<&str>, query: &Query) -> Url {
    let mut pairs: Vec<String> = QUERY_SETTINGS
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();

    if let Some(database) = database {
        pairs.push(format!("database={}", urlencoding::encode(database)));
    }

    for (name, param) in query.params() {
        pairs.push(format!(
            "param_{}={}",
            urlencoding::encode(name),
            urlencoding::encode(&param_value(param))
        ));
    }

    let mut url = base_url.clone();
    url.set_query(Some(&pairs.join("&")));
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:8123/").unwrap()
    }

    #[test]
    fn test_settings_always_present() {
        let url = build_query_url(&base(), None, &Query::new("SELECT 1"));
        let query = url.query().unwrap();
        assert!(query.starts_with("default_format=JSONCompact"));
        assert!(query.contains("output_format_json_quote_64bit_integers=0"));
        assert!(!query.contains("database="));
    }

    #[test]
    fn test_params_are_encoded() {
        let query = Query::new("SELECT {v:String}, {p:UInt64}")
            .bind("v", QueryParam::String("1_100_A&B_G".to_string()))
            .bind("p", QueryParam::UInt64(12345));
        let url = build_query_url(&base(), Some("ot"), &query);

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("database".to_string(), "ot".to_string())));
        assert!(pairs.contains(&("param_v".to_string(), "1_100_A&B_G".to_string())));
        assert!(pairs.contains(&("param_p".to_string(), "12345".to_string())));
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(param_value(&QueryParam::String("a\\b\tc".to_string())), "a\\\\b\\tc");
    }

    #[test]
    fn test_array_literal() {
        let value = param_value(&QueryParam::StringArray(vec![
            "GCST1".to_string(),
            "it's".to_string(),
        ]));
        assert_eq!(value, "['GCST1','it\\\\'s']");
        assert_eq!(param_value(&QueryParam::StringArray(Vec::new())), "[]");
    }
}
