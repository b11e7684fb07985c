//! HTML parsing and document queries

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{PageError, Result};

/// Elements whose text content is never rendered
const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parse and validate an analysis target.
///
/// Only absolute `http` and `https` URLs are accepted.
pub fn validate_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let parsed = Url::parse(trimmed).map_err(|e| PageError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(PageError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// A parsed HTML document plus the derived page text.
///
/// Parsing is best effort: html5ever repairs malformed markup instead of
/// rejecting it, so building a `Page` never fails.
pub struct Page {
    document: Html,
    html_bytes: usize,
    text: String,
    text_lower: String,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let text = collect_text_nodes(&document).join(" ");
        let text_lower = text.to_lowercase();

        Self {
            document,
            html_bytes: html.len(),
            text,
            text_lower,
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.document.root_element()
    }

    /// Size of the source markup in UTF-8 bytes
    pub fn html_bytes(&self) -> usize {
        self.html_bytes
    }

    /// Visible text of the whole page, one space between text nodes
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Case-folded [`Page::text`]
    pub fn text_lower(&self) -> &str {
        &self.text_lower
    }

    /// Trimmed, non-empty visible text nodes in document order
    pub fn text_nodes(&self) -> Vec<&str> {
        collect_text_nodes(&self.document)
    }

    /// All elements matching a CSS selector, in document order.
    ///
    /// An unparseable selector matches nothing.
    pub fn select_all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(selector) => self.document.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.document.select(&selector).next()
    }

    /// All elements with the given tag name
    pub fn find_all(&self, tag: &str) -> Vec<ElementRef<'_>> {
        self.select_all(tag)
    }

    pub fn exists(&self, selector: &str) -> bool {
        self.select_first(selector).is_some()
    }

    pub fn count(&self, selector: &str) -> usize {
        match Selector::parse(selector) {
            Ok(selector) => self.document.select(&selector).count(),
            Err(_) => 0,
        }
    }

    /// Raw JSON-LD script bodies, empty blocks skipped
    pub fn json_ld_blocks(&self) -> Vec<String> {
        self.select_all("script")
            .into_iter()
            .filter_map(|element| {
                let script_type = element
                    .value()
                    .attr("type")
                    .map(|t| t.trim().to_ascii_lowercase())
                    .unwrap_or_default();

                // Matches "application/ld+json; charset=utf-8" as well
                if script_type.contains("ld+json") {
                    let text = element.text().collect::<String>().trim().to_string();
                    if text.is_empty() { None } else { Some(text) }
                } else {
                    None
                }
            })
            .collect()
    }
}

fn collect_text_nodes(document: &Html) -> Vec<&str> {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name().to_string()))
                .is_some_and(|name| HIDDEN_TEXT_PARENTS.contains(&name.as_str()));
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            if trimmed.is_empty() { None } else { Some(trimmed) }
        })
        .collect()
}

/// Element text with whitespace stripped from every piece, pieces joined by one space
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-folded attribute value, empty when absent
pub fn attr_lower(element: &ElementRef<'_>, name: &str) -> String {
    element
        .value()
        .attr(name)
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Case-folded `class` and `id` attributes joined by a space
pub fn class_and_id(element: &ElementRef<'_>) -> String {
    format!("{} {}", attr_lower(element, "class"), attr_lower(element, "id"))
}

pub fn parent_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Up to `depth` ancestors, nearest first
pub fn ancestors<'a>(element: &ElementRef<'a>, depth: usize) -> Vec<ElementRef<'a>> {
    let mut found = Vec::with_capacity(depth);
    let mut current = *element;
    while found.len() < depth {
        match parent_element(&current) {
            Some(parent) => {
                found.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("  https://example.com/p/1 ").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        for input in ["ftp://example.com", "file:///etc/passwd", "javascript:alert(1)"] {
            let err = validate_url(input).unwrap_err();
            assert!(matches!(err, PageError::InvalidUrl { .. }), "{input}");
        }
    }

    #[test]
    fn test_validate_url_rejects_relative() {
        let err = validate_url("example.com/product").unwrap_err();
        assert!(err.to_string().contains("invalid URL"));
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let page = Page::parse("<div><p>Unclosed <b>tags<div>and more</p>");
        assert!(page.text().contains("Unclosed"));
        assert!(page.text().contains("and more"));
    }

    #[test]
    fn test_text_skips_scripts_and_styles() {
        let page = Page::parse(
            r#"<html><head><style>.a { color: red; }</style></head>
            <body><p>Visible</p><script>var price = "$999";</script></body></html>"#,
        );
        assert_eq!(page.text(), "Visible");
        assert_eq!(page.text_nodes(), vec!["Visible"]);
    }

    #[test]
    fn test_text_lower_is_case_folded() {
        let page = Page::parse("<p>Add To CART</p>");
        assert_eq!(page.text_lower(), "add to cart");
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let page = Page::parse("<p>hi</p>");
        assert!(page.select_all("p[").is_empty());
        assert_eq!(page.count("p["), 0);
        assert!(!page.exists("p["));
    }

    #[test]
    fn test_element_text_collapses_pieces() {
        let page = Page::parse("<h1>\n  Widget\n  <span> Pro </span></h1>");
        let h1 = page.select_first("h1").unwrap();
        assert_eq!(element_text(&h1), "Widget Pro");
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let page = Page::parse(
            r#"<div id="outer"><section id="mid"><p id="inner"><button>Go</button></p></section></div>"#,
        );
        let button = page.select_first("button").unwrap();
        let ids: Vec<_> = ancestors(&button, 3)
            .iter()
            .map(|e| e.value().attr("id").unwrap_or(""))
            .collect();
        assert_eq!(ids, vec!["inner", "mid", "outer"]);
    }

    #[test]
    fn test_json_ld_blocks_with_charset_and_empty() {
        let page = Page::parse(
            r#"
            <script type="APPLICATION/LD+JSON; charset=utf-8">{"@type": "Product"}</script>
            <script type="application/ld+json">   </script>
            <script>console.log(1)</script>
            "#,
        );
        let blocks = page.json_ld_blocks();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Product"));
    }

    #[test]
    fn test_html_bytes_counts_utf8() {
        let page = Page::parse("<p>€</p>");
        assert_eq!(page.html_bytes(), "<p>€</p>".len());
    }
}
