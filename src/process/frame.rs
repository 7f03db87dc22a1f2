// src/process/frame.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument, trace, warn};

use super::raw_table::RawTable;
use crate::error::{SheetError, SheetResult};

/// `"table":` … `});` on one line, greedy to the last closing marker.
static TABLE_FRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""table":(.*)\}\);"#).expect("table frame regex should compile"));

static STATUS_ERROR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""status"\s*:\s*"error""#).expect("status regex should compile"));

static DETAILED_MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""detailed_message"\s*:\s*"((?:[^"\\]|\\.)*)""#)
        .expect("detailed message regex should compile")
});

static MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""message"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("message regex should compile")
});

const PREVIEW_CHARS: usize = 120;

/// Locate the embedded table literal inside a gviz response body.
pub fn extract_payload(text: &str) -> SheetResult<&str> {
    match TABLE_FRAME.captures(text).and_then(|c| c.get(1)) {
        Some(m) => {
            trace!(start = m.start(), len = m.len(), "found table frame");
            Ok(m.as_str())
        }
        None => {
            let reason = endpoint_error(text);
            warn!(reason = ?reason, body_len = text.len(), "table frame not found");
            Err(SheetError::MalformedResponse {
                preview: text.chars().take(PREVIEW_CHARS).collect(),
                reason,
            })
        }
    }
}

/// Parse an extracted payload into the column/row descriptor.
pub fn parse_payload(payload: &str) -> SheetResult<RawTable> {
    let table: RawTable = serde_json::from_str(payload)?;
    debug!(
        cols = table.cols.len(),
        rows = table.rows.len(),
        "parsed table payload"
    );
    Ok(table)
}

/// Two-phase: frame extraction, then JSON parsing.
#[instrument(level = "debug", skip(text), fields(body_len = text.len()))]
pub fn parse_response(text: &str) -> SheetResult<RawTable> {
    let payload = extract_payload(text)?;
    parse_payload(payload)
}

/// The endpoint's own message when its envelope reports `"status":"error"`.
fn endpoint_error(text: &str) -> Option<String> {
    if !STATUS_ERROR.is_match(text) {
        return None;
    }
    let message = [&*DETAILED_MESSAGE, &*MESSAGE]
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_string());
    Some(message.unwrap_or_else(|| "endpoint reported status error".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"/*O_o*/
google.visualization.Query.setResponse({"version":"0.6","reqId":"0","status":"ok","sig":"1053501725","table":{"cols":[{"id":"A","label":"name","type":"string"},{"id":"B","label":"count","type":"number","pattern":"General"}],"rows":[{"c":[{"v":"alpha"},{"v":3.0,"f":"3"}]},{"c":[null,{"v":null}]}],"parsedNumHeaders":1}});"#;

    #[test]
    fn extracts_between_markers() {
        let payload = extract_payload(BODY).unwrap();
        assert!(payload.starts_with(r#"{"cols":"#));
        assert!(payload.ends_with(r#""parsedNumHeaders":1}"#));
    }

    #[test]
    fn parses_cols_and_sparse_rows() {
        let table = parse_response(BODY).unwrap();
        assert_eq!(table.cols.len(), 2);
        assert_eq!(table.cols[1].label, "count");
        assert_eq!(table.cols[1].ty, "number");
        assert_eq!(table.cols[1].pattern.as_deref(), Some("General"));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].c[1].as_ref().unwrap().f.as_deref(), Some("3"));
        assert!(table.rows[1].c[0].is_none());
        assert_eq!(table.rows[1].c[1].as_ref().unwrap().v, None);
    }

    #[test]
    fn missing_frame_is_malformed() {
        let err = parse_response("<html>Sign in</html>").unwrap_err();
        match err {
            SheetError::MalformedResponse { preview, reason } => {
                assert_eq!(preview, "<html>Sign in</html>");
                assert!(reason.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_trailing_marker_is_malformed() {
        let body = r#"setResponse({"status":"ok","table":{"cols":[],"rows":[]}}"#;
        assert!(matches!(
            extract_payload(body),
            Err(SheetError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn endpoint_error_message_is_reported() {
        let body = r#"google.visualization.Query.setResponse({"version":"0.6","reqId":"0","status":"error","errors":[{"reason":"access_denied","message":"Access denied","detailed_message":"Sheet is private"}]});"#;
        match extract_payload(body).unwrap_err() {
            SheetError::MalformedResponse { reason, .. } => {
                assert_eq!(reason.as_deref(), Some("Sheet is private"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn table_without_cols_and_rows_is_parse_error() {
        for body in [
            r#"setResponse({"status":"ok","table":{}});"#,
            r#"setResponse({"status":"ok","table":[]});"#,
            r#"setResponse({"status":"ok","table":{"columns":[],"rows":[]}});"#,
            r#"setResponse({"status":"ok","table":{"cols":[],"rows":[{"cells":[]}]}});"#,
        ] {
            assert!(
                matches!(parse_response(body), Err(SheetError::PayloadParse(_))),
                "expected parse error for {body}"
            );
        }
    }

    #[test]
    fn invalid_payload_is_parse_error() {
        let body = r#"setResponse({"table":{cols: [}});"#;
        assert!(matches!(
            parse_response(body),
            Err(SheetError::PayloadParse(_))
        ));
    }
}
