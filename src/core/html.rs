//! Narrow selector-query layer over `scraper`.
//!
//! Callers only need `query_all`, `text` and `attr`; selector strings stay
//! plain data owned by the vendor profile.

use crate::utils::error::{EtlError, Result};
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document. Not `Send`: parse, query, and drop it between
/// awaits.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    pub fn parse(body: &str) -> Self {
        Self {
            document: Html::parse_document(body),
        }
    }

    /// Matches anywhere in the document, the root element included.
    pub fn query_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.document.select(&sel).collect())
    }
}

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| EtlError::SelectorError {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Descendants of `root` matching `selector`, in document order.
pub fn query_all<'a>(root: ElementRef<'a>, selector: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = parse_selector(selector)?;
    Ok(root.select(&sel).collect())
}

pub fn text(node: ElementRef<'_>) -> String {
    node.text().collect()
}

/// Concatenated text of every node, like jQuery's `.text()` on a selection.
pub fn text_of_all(nodes: &[ElementRef<'_>]) -> String {
    nodes.iter().map(|n| text(*n)).collect()
}

pub fn attr(node: ElementRef<'_>, name: &str) -> Option<String> {
    node.value().attr(name).map(str::to_string)
}
