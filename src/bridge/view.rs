//! Boundary to the user-facing side of an uncaught failure: the response status and a
//! minimal error page. End users only ever see the error id and a generic message.

/// Renders the error page body. Implementations must escape both values.
pub trait ErrorView: Send + Sync {
    fn render(&self, error_id: &str, user_message: &str) -> String;
}

/// The outgoing response, when the process is serving one.
pub trait Responder: Send + Sync {
    fn headers_sent(&self) -> bool;
    fn set_status(&self, status: u16);
    fn send_body(&self, body: String);
}

/// Self-contained HTML page showing the message and the id to quote to support.
#[derive(Debug, Clone, Default)]
pub struct StaticErrorPage;

impl ErrorView for StaticErrorPage {
    fn render(&self, error_id: &str, user_message: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Something went wrong</title>
  <style>
    body {{ font-family: sans-serif; background: #f5f5f5; color: #333; text-align: center; padding: 4em; }}
    .card {{ background: white; padding: 2em; border-radius: 8px; display: inline-block; max-width: 500px; }}
    h1 {{ margin-top: 0; color: #c0392b; }}
    .error-id {{ font-family: monospace; background: #eee; padding: 0.2em 0.4em; border-radius: 4px; }}
  </style>
</head>
<body>
  <div class="card">
    <h1>Oops! Something went wrong.</h1>
    <p>{message}</p>
    <p>Error ID: <span class="error-id">{id}</span></p>
    <p><a href="/">Return Home</a></p>
  </div>
</body>
</html>
"#,
            message = escape_html(user_message),
            id = escape_html(error_id),
        )
    }
}

/// Escapes the five characters with special meaning in HTML text and attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
