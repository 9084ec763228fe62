use crate::error::{Result, ScraperError};
use crate::types::FrequencyTable;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("valid selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static DATA_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Title and frequency table of a populated region page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub title: String,
    pub table: FrequencyTable,
}

/// Extracts the pieces of a RepeaterBook region page we care about.
pub struct PageParser {
    table_class: String,
    table_selector: Selector,
    not_found_title: String,
}

impl PageParser {
    /// `table_class` must match the table's whole `class` attribute, not a
    /// single class name.
    pub fn new(table_class: &str, not_found_title: &str) -> Result<Self> {
        let css = format!("table[class=\"{}\"]", table_class);
        let table_selector = Selector::parse(&css).map_err(|e| {
            ScraperError::Config(format!("invalid table class '{}': {}", table_class, e))
        })?;
        Ok(Self {
            table_class: table_class.to_string(),
            table_selector,
            not_found_title: not_found_title.to_string(),
        })
    }

    /// Title check first, then the table lookup.
    pub fn parse_page(&self, html: &str, url: &str) -> Result<ParsedPage> {
        let document = Html::parse_document(html);
        let title = self.check_title(&document, url)?;
        let table = self.parse_table(&document, url)?;
        Ok(ParsedPage { title, table })
    }

    /// Returns the page title, or `RegionNotFound` when the title is missing
    /// or is the placeholder RepeaterBook serves for unknown regions.
    pub fn check_title(&self, document: &Html, url: &str) -> Result<String> {
        match page_title(document) {
            Some(title) if title != self.not_found_title => Ok(title),
            _ => Err(ScraperError::RegionNotFound { url: url.to_string() }),
        }
    }

    pub fn find_table<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&self.table_selector).next()
    }

    pub fn parse_table(&self, document: &Html, url: &str) -> Result<FrequencyTable> {
        let table = self.find_table(document).ok_or_else(|| ScraperError::TableNotFound {
            class: self.table_class.clone(),
            url: url.to_string(),
        })?;
        let table = extract_table(table);
        debug!(headers = ?table.headers, rows = ?table.rows, "Extracted frequency table");
        Ok(table)
    }
}

pub fn page_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
}

/// Header cells and data rows in document order. Rows without any `td`
/// (the header row) are not data rows.
pub fn extract_table(table: ElementRef<'_>) -> FrequencyTable {
    let headers = table.select(&HEADER_CELL).map(cell_text).collect();
    let rows = table
        .select(&ROW)
        .map(|row| row.select(&DATA_CELL).map(cell_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();
    FrequencyTable { headers, rows }
}

/// Cell text with every whitespace run (tabs and newlines included)
/// collapsed to one space, so a cell can never break a TSV line or column.
fn cell_text(cell: ElementRef<'_>) -> String {
    let text: String = cell.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Re-serializes a document one node per line, indenting one space per
/// nesting level. Whitespace-only text nodes are dropped. Contents of
/// `pre`, `textarea`, `script` and `style` are written verbatim.
pub fn prettify(document: &Html) -> String {
    let mut out = String::new();
    for node in document.tree.root().children() {
        if let Node::Doctype(doctype) = node.value() {
            out.push_str(&doctype_line(doctype.name(), doctype.public_id(), doctype.system_id()));
        }
    }
    write_element(document.root_element(), 0, &mut out);
    out
}

fn doctype_line(name: &str, public_id: &str, system_id: &str) -> String {
    let mut line = format!("<!DOCTYPE {}", name);
    if !public_id.is_empty() {
        line.push_str(&format!(" PUBLIC \"{}\"", public_id));
        if !system_id.is_empty() {
            line.push_str(&format!(" \"{}\"", system_id));
        }
    } else if !system_id.is_empty() {
        line.push_str(&format!(" SYSTEM \"{}\"", system_id));
    }
    line.push_str(">\n");
    line
}

fn write_element(element: ElementRef<'_>, depth: usize, out: &mut String) {
    let el = element.value();
    let name = el.name();

    out.push_str(&" ".repeat(depth));
    out.push('<');
    out.push_str(name);
    for (attr, value) in el.attrs() {
        out.push_str(&format!(" {}=\"{}\"", attr, escape(value, true)));
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        out.push('\n');
        return;
    }

    // Whitespace is significant here; keep the serialized content as is.
    if matches!(name, "pre" | "textarea" | "script" | "style") {
        out.push_str(&element.inner_html());
        out.push_str(&format!("</{}>\n", name));
        return;
    }
    out.push('\n');

    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    write_element(child, depth + 1, out);
                }
            }
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    out.push_str(&" ".repeat(depth + 1));
                    out.push_str(&escape(text, false));
                    out.push('\n');
                }
            }
            Node::Comment(comment) => {
                out.push_str(&" ".repeat(depth + 1));
                out.push_str(&format!("<!--{}-->\n", &**comment));
            }
            _ => {}
        }
    }

    out.push_str(&" ".repeat(depth));
    out.push_str(&format!("</{}>\n", name));
}

fn escape(s: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FREQUENCY_TABLE_CLASS, NOT_FOUND_TITLE};

    const URL: &str = "https://www.repeaterbook.com/repeaters/Display_SS.php?state_id=53";

    const WASHINGTON: &str = r#"<!DOCTYPE html>
<html>
<head><title>
    Washington Amateur Radio Repeaters
</title></head>
<body>
  <table class="w3-table">
    <tr><th>Decoy</th></tr>
    <tr><td>not this one</td></tr>
  </table>
  <table class="w3-table sortable w3-responsive w3-striped">
    <thead>
      <tr><th> Frequency </th><th>Offset</th><th>Tone</th><th>Location</th></tr>
    </thead>
    <tbody>
      <tr><td>
          146.940
        </td><td>-0.600</td><td>103.5</td><td> Seattle </td></tr>
      <tr><td>147.320</td><td>+0.600</td><td>131.8</td><td><a href="/x">Tacoma</a></td></tr>
      <tr><td>224.100</td><td>-1.600</td><td></td><td>Everett</td></tr>
    </tbody>
  </table>
</body>
</html>"#;

    fn parser() -> PageParser {
        PageParser::new(FREQUENCY_TABLE_CLASS, NOT_FOUND_TITLE).unwrap()
    }

    #[test]
    fn test_page_title_trimmed() {
        let doc = Html::parse_document(WASHINGTON);
        assert_eq!(page_title(&doc).as_deref(), Some("Washington Amateur Radio Repeaters"));
        assert_eq!(
            parser().check_title(&doc, URL).unwrap(),
            "Washington Amateur Radio Repeaters"
        );
    }

    #[test]
    fn test_placeholder_title_is_not_found() {
        let doc = Html::parse_document(
            "<html><head><title> Amateur Radio Repeaters </title></head><body></body></html>",
        );
        let err = parser().check_title(&doc, URL).unwrap_err();
        assert!(matches!(err, ScraperError::RegionNotFound { .. }));
    }

    #[test]
    fn test_missing_title_is_not_found() {
        let doc = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert!(page_title(&doc).is_none());
        assert!(parser().check_title(&doc, URL).is_err());
    }

    #[test]
    fn test_table_matches_exact_class_attribute() {
        let doc = Html::parse_document(WASHINGTON);
        let table = parser().find_table(&doc).unwrap();
        assert_eq!(
            table.value().attr("class"),
            Some("w3-table sortable w3-responsive w3-striped")
        );
    }

    #[test]
    fn test_extract_preserves_document_order_and_trims() {
        let doc = Html::parse_document(WASHINGTON);
        let table = parser().parse_table(&doc, URL).unwrap();

        assert_eq!(table.headers, vec!["Frequency", "Offset", "Tone", "Location"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["146.940", "-0.600", "103.5", "Seattle"],
                vec!["147.320", "+0.600", "131.8", "Tacoma"],
                vec!["224.100", "-1.600", "", "Everett"],
            ]
        );
    }

    #[test]
    fn test_absent_table_is_explicit() {
        let doc = Html::parse_document(
            "<html><head><title>Oregon Amateur Radio Repeaters</title></head><body></body></html>",
        );
        assert!(parser().find_table(&doc).is_none());
        let err = parser().parse_table(&doc, URL).unwrap_err();
        assert!(matches!(err, ScraperError::TableNotFound { .. }));
    }

    #[test]
    fn test_invalid_table_class_rejected() {
        assert!(PageParser::new("bad\"class", NOT_FOUND_TITLE).is_err());
    }

    #[test]
    fn test_prettify_indents_and_drops_blank_text() {
        let doc = Html::parse_document(
            "<!DOCTYPE html><html><head><title>T &amp; U</title></head><body><p class=\"a\">x<br>y</p></body></html>",
        );
        let pretty = prettify(&doc);
        let lines: Vec<&str> = pretty.lines().collect();

        assert_eq!(lines[0], "<!DOCTYPE html>");
        assert_eq!(lines[1], "<html>");
        assert_eq!(lines[2], " <head>");
        assert_eq!(lines[3], "  <title>");
        assert_eq!(lines[4], "   T &amp; U");
        assert!(pretty.contains("  <p class=\"a\">\n   x\n   <br>\n   y\n  </p>\n"));
        assert_eq!(*lines.last().unwrap(), "</html>");
    }

    #[test]
    fn test_cell_whitespace_collapsed_to_single_spaces() {
        let doc = Html::parse_document(
            "<table class=\"w3-table sortable w3-responsive w3-striped\">\
             <tr><th>Frequency</th><th>Location\n  Notes</th></tr>\
             <tr><td>146.940</td><td>Birmingham,\n   Jefferson\tCounty</td></tr></table>",
        );
        let table = parser().parse_table(&doc, URL).unwrap();

        assert_eq!(table.headers, vec!["Frequency", "Location Notes"]);
        assert_eq!(table.rows, vec![vec!["146.940", "Birmingham, Jefferson County"]]);
        assert!(table.rows[0].iter().all(|cell| !cell.contains(['\t', '\n'])));
    }

    #[test]
    fn test_parse_page_combines_title_and_table() {
        let page = parser().parse_page(WASHINGTON, URL).unwrap();
        assert_eq!(page.title, "Washington Amateur Radio Repeaters");
        assert_eq!(page.table.rows.len(), 3);

        let err = parser()
            .parse_page("<html><head><title>Amateur Radio Repeaters</title></head></html>", URL)
            .unwrap_err();
        assert!(matches!(err, ScraperError::RegionNotFound { .. }));
    }

    #[test]
    fn test_prettify_keeps_source_doctype() {
        let doc = Html::parse_document(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd"><html><head></head><body></body></html>"#,
        );
        assert!(prettify(&doc).starts_with(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">\n<html>\n"
        ));

        let bare = Html::parse_document("<html><body></body></html>");
        assert!(prettify(&bare).starts_with("<html>\n"));
    }

    #[test]
    fn test_prettify_preserves_preformatted_text() {
        let doc = Html::parse_document(
            "<html><body><pre>  146.940\n    -0.600 &amp; up</pre><textarea> a\n b</textarea></body></html>",
        );
        let pretty = prettify(&doc);
        assert!(pretty.contains("  <pre>  146.940\n    -0.600 &amp; up</pre>\n"));
        assert!(pretty.contains("  <textarea> a\n b</textarea>\n"));
    }

    #[test]
    fn test_prettify_keeps_attribute_order() {
        let doc = Html::parse_document(
            r#"<html><body><table id="freq" class="w3-table sortable" style="width:100%" data-sort="1"></table></body></html>"#,
        );
        assert!(prettify(&doc)
            .contains(r#"  <table id="freq" class="w3-table sortable" style="width:100%" data-sort="1">"#));
    }
}
