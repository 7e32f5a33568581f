use urdu_translator::form::{self, FormOutcome};

const TEMPLATE: &str = include_str!("static/index.html");

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_outcome(outcome: &FormOutcome) -> String {
    match outcome {
        FormOutcome::Warning { message } => {
            format!(r#"<div class="warning">{}</div>"#, escape_html(message))
        }
        FormOutcome::Success { translation } => format!(
            r#"<div class="success">{}</div><p>{} <strong class="urdu">{}</strong></p>"#,
            escape_html(form::SUCCESS_BANNER),
            escape_html(form::RESULT_LABEL),
            escape_html(translation)
        ),
        FormOutcome::Failure { message } => {
            format!(r#"<div class="failure">{}</div>"#, escape_html(message))
        }
    }
}

/// Substitute `{{KEY}}` slots in one pass, so values are never re-scanned
fn fill(template: &str, slots: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match slots.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render the whole page, keeping the submitted text in the text area
pub fn render(text: &str, outcome: Option<&FormOutcome>) -> String {
    fill(
        TEMPLATE,
        &[
            ("TITLE", escape_html(form::PAGE_TITLE)),
            ("HEADING", escape_html(form::HEADING)),
            ("INTRO", escape_html(form::INTRO)),
            ("INPUT_LABEL", escape_html(form::INPUT_LABEL)),
            ("BUTTON", escape_html(form::BUTTON_LABEL)),
            ("SPINNER", escape_html(form::SPINNER_TEXT)),
            ("TEXT", escape_html(text)),
            ("OUTCOME", outcome.map(render_outcome).unwrap_or_default()),
        ],
    )
}
