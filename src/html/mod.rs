//! # HTML Surface
//!
//! Turns a [`Rendered`] dashboard into a self-contained HTML page: the theme
//! stylesheet in the head, effect markup, then one block per artifact with
//! charts drawn as inline SVG.
//!
//! Also renders the system-level pages (welcome, connection error, not
//! found) served by the HTTP host.

mod effects;
pub mod markdown;
pub mod svg;

use crate::render::{Artifact, Rendered};
use crate::theme::PresentationDirectives;

const DEFAULT_TITLE: &str = "Dashboard";

/// Layout rules that apply with or without a theme.
const BASE_CSS: &str = "\
*, *::before, *::after { box-sizing: border-box; }
body { margin: 0; font-family: sans-serif; line-height: 1.5; }
.tb-dashboard { max-width: 1100px; margin: 0 auto; padding: 2rem 1.5rem; position: relative; z-index: 2; }
.tb-panel { margin-bottom: 1rem; }
.tb-metric-label { font-size: 0.9em; opacity: 0.8; }
.tb-metric-value { font-size: 2.25em; font-weight: 600; }
.tb-chart svg { width: 100%; height: auto; display: block; }
.tb-table { overflow-x: auto; }
.tb-table table { border-collapse: collapse; width: 100%; }
.tb-table th, .tb-table td { padding: 0.35rem 0.6rem; border-bottom: 1px solid rgba(128, 128, 128, 0.3); text-align: left; }
.tb-error { border-left: 4px solid #D93025; background: rgba(217, 48, 37, 0.08); padding: 0.75rem 1rem; margin-bottom: 1rem; }
";

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render a full dashboard page.
pub fn page(rendered: &Rendered) -> String {
    let title = rendered
        .artifacts
        .iter()
        .find_map(|a| match a {
            Artifact::Header { text } => Some(text.as_str()),
            _ => None,
        })
        .unwrap_or(DEFAULT_TITLE);

    let mut head = String::new();
    if let Some(theme) = &rendered.theme {
        head.push_str(&format!("<style>\n{}</style>\n", theme.stylesheet()));
    }
    head.push_str(&effects::head(&rendered.effects));

    let mut body = effects::body(&rendered.effects);
    body.push_str("<main class=\"tb-dashboard\">\n");
    let accent = rendered.theme.as_ref().map(|t| t.primary_color.as_str());
    for artifact in &rendered.artifacts {
        body.push_str(&artifact_html(artifact, accent));
        body.push('\n');
    }
    body.push_str("</main>\n");

    document(title, &head, &body)
}

/// Render one artifact as an HTML block.
pub fn artifact_html(artifact: &Artifact, accent: Option<&str>) -> String {
    match artifact {
        Artifact::Header { text } => format!("<h2 class=\"tb-header\">{}</h2>", escape(text)),
        Artifact::Markdown { text } => {
            format!("<div class=\"tb-markdown\">{}</div>", markdown::to_html(text))
        }
        Artifact::Metric { label, value, .. } => format!(
            "<div class=\"tb-panel tb-metric\"><div class=\"tb-metric-label\">{}</div>\
             <div class=\"tb-metric-value\">{}</div></div>",
            escape(label),
            escape(value)
        ),
        Artifact::Chart(chart) => {
            let heading = chart
                .title
                .as_deref()
                .map(|t| format!("<h3>{}</h3>", escape(t)))
                .unwrap_or_default();
            format!(
                "<section class=\"tb-chart\">{}<div class=\"tb-panel\">{}</div></section>",
                heading,
                svg::chart(&chart.figure, accent)
            )
        }
        Artifact::Table {
            title,
            columns,
            rows,
        } => {
            let mut html = format!(
                "<section><h3>{}</h3><div class=\"tb-panel tb-table\"><table><thead><tr>",
                escape(title)
            );
            for column in columns {
                html.push_str(&format!("<th>{}</th>", escape(column)));
            }
            html.push_str("</tr></thead><tbody>");
            for row in rows {
                html.push_str("<tr>");
                for cell in row {
                    html.push_str(&format!("<td>{}</td>", escape(&cell.to_string())));
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody></table></div></section>");
            html
        }
        Artifact::Error {
            index,
            element_type,
            message,
        } => format!(
            "<div class=\"tb-error\" role=\"alert\">Could not render element #{} ({}): {}</div>",
            index,
            escape(element_type),
            escape(message)
        ),
    }
}

/// A page carrying a single message, used for request-level failures.
pub fn message_page(title: &str, message: &str) -> String {
    let body = format!(
        "<main class=\"tb-dashboard\"><div class=\"tb-error\" role=\"alert\">{}</div></main>\n",
        escape(message)
    );
    document(title, "", &body)
}

/// Landing page shown when no dashboard is requested.
pub fn welcome_page() -> String {
    let theme = PresentationDirectives {
        background_color: "#000000".into(),
        text_color: "#E0E0E0".into(),
        ..crate::theme::resolve(&Default::default())
    };
    let head = format!(
        "<style>\n{}.tb-welcome {{ min-height: 90vh; display: flex; flex-direction: column; \
         align-items: center; justify-content: center; text-align: center; }}\n\
         .tb-welcome h1 {{ font-size: 3rem; color: #FFFFFF; margin-bottom: 1rem; }}\n\
         .tb-welcome p {{ max-width: 600px; font-size: 1.125rem; color: #A1A1AA; }}\n</style>\n",
        theme.stylesheet()
    );
    let body = "<main class=\"tb-dashboard tb-welcome\">\
                <h1>Welcome to the AI dashboard generator</h1>\
                <p>Turn your data into a story in minutes. Open a dashboard by adding \
                <code>?dashboard_id=&lt;id&gt;</code> to the address.</p></main>\n";
    document("Welcome", &head, body)
}

fn document(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>\n{}</style>\n{}</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        BASE_CSS,
        head,
        body
    )
}
