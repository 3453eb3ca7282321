// Suggestion text formatter
// Turns the loosely marked-up text the backend returns (bold, italics,
// numbered steps, dash bullets) into display markup. Lossy and one-way.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    // Line starts are the string start or a <br> once newlines are replaced
    static ref ORDINAL: Regex = Regex::new(r"(^|<br>)(\d+\.)\s").unwrap();
    static ref BULLET: Regex = Regex::new(r"(^|<br>)- ").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Escape text for inclusion in markup, attribute values included.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Convert suggestion or meal-plan text to markup.
///
/// Rules run in a fixed order, each on the output of the previous one:
///
/// 1. `**text**` becomes `<strong>text</strong>`
/// 2. `*text*` becomes `<em>text</em>`
/// 3. newlines become `<br>`
/// 4. a line starting with `<digits>.` and whitespace gets a line break and
///    a bold ordinal
/// 5. a line starting with `- ` gets a line break and a bullet glyph
///
/// The payload is HTML-escaped before any rule runs, so server text can
/// never inject markup of its own.
pub fn format_suggestions(text: &str) -> String {
    let escaped = escape_html(text);

    let html = BOLD.replace_all(&escaped, "<strong>${1}</strong>");
    let html = ITALIC.replace_all(&html, "<em>${1}</em>");
    let html = html.replace('\n', "<br>");
    let html = ORDINAL.replace_all(&html, "${1}<br><strong>${2}</strong> ");
    let html = BULLET.replace_all(&html, "${1}<br>• ");

    html.into_owned()
}

/// Flatten formatter output for a plain-text surface such as a terminal.
pub fn to_plain_text(html: &str) -> String {
    let text = html.replace("<br>", "\n");
    let text = TAG.replace_all(&text, "");

    html_escape::decode_html_entities(&text)
        .trim_start_matches('\n')
        .to_string()
}
