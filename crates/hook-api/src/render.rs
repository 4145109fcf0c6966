//! HTML view of captured webhooks.

use hook_types::{Record, RenderError, Renderer};
use std::fmt::Write as _;
use std::sync::Arc;

const EMPTY_PLACEHOLDER: &str =
    "No webhooks received yet. Send a request to /wh endpoint on this server.";

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Webhook Logger</title>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif; padding: 20px; }
    h1 { color: #333; }
    .webhook { margin-bottom: 20px; border: 1px solid #ddd; padding: 15px; border-radius: 4px; }
    .webhook:hover { background-color: #f9f9f9; }
    .method { font-weight: bold; }
    .GET { color: green; }
    .POST { color: blue; }
    .PUT { color: orange; }
    .DELETE { color: red; }
    .timestamp { color: #666; font-size: 0.9em; }
    pre { background-color: #f5f5f5; padding: 10px; border-radius: 4px; overflow: auto; }
    .empty { color: #999; font-style: italic; }
    .refresh { margin-bottom: 20px; }
  </style>
</head>
<body>
  <h1>Webhook Logger</h1>
  <button class="refresh" onclick="location.reload()">Refresh</button>
  <div id="webhooks">
"#;

const PAGE_TAIL: &str = r#"  </div>
  <script>
    setTimeout(() => location.reload(), 5e3);
  </script>
</body>
</html>
"#;

/// Renders the full page: one block per record, or the placeholder when there are none.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, records: &[Arc<Record>]) -> Result<String, RenderError> {
        let mut html = String::from(PAGE_HEAD);
        if records.is_empty() {
            writeln!(html, "    <p class=\"empty\">{}</p>", EMPTY_PLACEHOLDER)
                .map_err(format_error)?;
        }
        for record in records {
            write_record(&mut html, record)?;
        }
        html.push_str(PAGE_TAIL);
        Ok(html)
    }
}

fn write_record(html: &mut String, record: &Record) -> Result<(), RenderError> {
    let pretty = |value: &serde_json::Value| {
        serde_json::to_string_pretty(value).map_err(|source| RenderError::Serialize {
            id: record.id,
            source,
        })
    };
    let headers = serde_json::to_value(&record.headers).map_err(|source| {
        RenderError::Serialize {
            id: record.id,
            source,
        }
    })?;
    let query = serde_json::to_value(&record.query).map_err(|source| RenderError::Serialize {
        id: record.id,
        source,
    })?;

    write!(
        html,
        r#"    <div class="webhook" id="webhook-{id}">
      <div>
        <span class="method {method_class}">{method}</span>
        <span>{path}</span>
        <span class="timestamp">{timestamp}</span>
      </div>
      <h3>Headers</h3>
      <pre>{headers}</pre>
      <h3>Query Parameters</h3>
      <pre>{query}</pre>
      <h3>Body</h3>
      <pre>{body}</pre>
    </div>
"#,
        id = record.id,
        method_class = escape_attr(&record.method),
        method = escape_text(&record.method),
        path = escape_text(&record.path),
        timestamp = escape_text(&record.timestamp),
        headers = escape_text(&pretty(&headers)?),
        query = escape_text(&pretty(&query)?),
        body = escape_text(&pretty(&record.body.to_display_value())?),
    )
    .map_err(format_error)
}

fn format_error(e: std::fmt::Error) -> RenderError {
    RenderError::Other(e.to_string())
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hook_types::{Body, NewRecord};
    use std::collections::BTreeMap;

    fn record(id: u64, path: &str, body: Body) -> Arc<Record> {
        Arc::new(Record::from_new(
            id,
            NewRecord {
                timestamp: "2024-05-01 12:00:00".to_string(),
                method: "POST".to_string(),
                path: path.to_string(),
                headers: BTreeMap::new(),
                query: BTreeMap::new(),
                body,
            },
        ))
    }

    #[test]
    fn empty_renders_placeholder_and_reload() {
        let html = HtmlRenderer::new().render(&[]).unwrap();
        assert!(html.contains(EMPTY_PLACEHOLDER));
        assert!(html.contains("setTimeout(() => location.reload(), 5e3)"));
        assert!(!html.contains("class=\"webhook\""));
    }

    #[test]
    fn body_is_pretty_printed_and_escaped() {
        let body = Body::Json(serde_json::json!({"id": 42, "html": "<b>"}));
        let html = HtmlRenderer::new()
            .render(&[record(1, "/wh/orders/123", body)])
            .unwrap();
        assert!(html.contains("\"id\": 42"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("<span>/wh/orders/123</span>"));
        assert!(!html.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn records_render_in_given_order() {
        let html = HtmlRenderer::new()
            .render(&[
                record(2, "/wh/second", Body::Absent),
                record(1, "/wh/first", Body::Absent),
            ])
            .unwrap();
        let second = html.find("/wh/second").unwrap();
        let first = html.find("/wh/first").unwrap();
        assert!(second < first);
    }
}
