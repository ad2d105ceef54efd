//! HTML-as-DOC writer.
//!
//! The `.doc` output is deliberately a self-contained styled HTML file
//! carrying a word-processor extension. Word processors open it by
//! convention; it is not an OOXML package and must not become one without
//! revisiting the contract.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::template::{DocumentSpec, SectionBody};

/// Renders the document as standalone markup.
pub fn render_doc_markup(doc: &DocumentSpec) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!(
        "<title>{} {}</title>\n",
        escape_html(&doc.subject),
        escape_html(&doc.title)
    ));
    html.push_str(shared_styles());
    html.push_str("</head>\n<body>\n<div class=\"container\">\n<div class=\"header\"></div>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&doc.title)));
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(&doc.subject)));
    if let Some(photo) = &doc.photo {
        html.push_str(&format!(
            "<img class=\"profile-img\" src=\"{}\" alt=\"Profile\">\n",
            escape_html(photo)
        ));
    }
    for section in &doc.sections {
        html.push_str(&format!("<h3>{}</h3>\n", escape_html(&section.heading)));
        match &section.body {
            SectionBody::Table(rows) => {
                html.push_str("<table>\n");
                for row in rows {
                    html.push_str(&format!(
                        "<tr><td class=\"label\">{}</td><td>{}</td></tr>\n",
                        escape_html(&row.label),
                        escape_html(&row.value)
                    ));
                }
                html.push_str("</table>\n");
            }
            SectionBody::Paragraph(text) => {
                html.push_str(&format!("<p>{}</p>\n", escape_html(text)));
            }
        }
    }
    html.push_str("<div class=\"footer\"></div>\n");
    html.push_str(&format!(
        "<div class=\"footer-text\">{}</div>\n",
        escape_html(&doc.footer)
    ));
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Writes the markup to `path` with the `.doc` convention.
pub fn write_doc(doc: &DocumentSpec, path: &Path) -> Result<()> {
    let markup = render_doc_markup(doc);
    fs::write(path, markup).with_context(|| format!("Failed to write {}", path.display()))
}

fn shared_styles() -> &'static str {
    "<style>
        body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f8f9fa; }
        .container { background-color: white; padding: 20px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); position: relative; }
        .header { background: linear-gradient(to right, #0f3460, #16488c); height: 15px; margin: -20px -20px 20px -20px; }
        .footer { background: linear-gradient(to right, #0f3460, #16488c); height: 10px; margin: 20px -20px -20px -20px; }
        h1 { color: #0f3460; text-align: center; }
        h2 { color: #0f3460; text-align: center; margin-bottom: 20px; }
        .profile-img { display: block; width: 150px; height: auto; margin: 0 auto 20px; border: 2px solid #b8860b; }
        h3 { color: #0f3460; border-bottom: 1px solid #b8860b; padding-bottom: 5px; }
        table { width: 100%; border-collapse: collapse; margin-bottom: 20px; }
        td { padding: 8px; vertical-align: top; }
        .label { font-weight: bold; width: 40%; }
        .footer-text { text-align: center; font-size: 10px; color: #666; margin-top: 20px; }
    </style>\n"
}

fn escape_html(input: &str) -> String {
    input
        .chars()
        .map(|ch| match ch {
            '<' => "&lt;".into(),
            '>' => "&gt;".into(),
            '&' => "&amp;".into(),
            '"' => "&quot;".into(),
            '\'' => "&#39;".into(),
            _ => ch.to_string(),
        })
        .collect::<String>()
}
