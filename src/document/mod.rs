//! Document model adapter
//!
//! This module wraps a parsed HTML tree behind the small query surface the
//! scorers need:
//! - Selecting elements with CSS selectors
//! - Reading element text and attributes
//! - Counting matches
//!
//! Parsing is permissive (unclosed tags and similar are tolerated). The only
//! failure is a body that is not markup at all.

use crate::ParseError;
use scraper::{ElementRef, Html, Selector};

/// Read-only, queryable view over a parsed HTML document
pub struct Document {
    html: Html,
}

/// A single element of a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl Document {
    /// Parses an HTML body into a queryable document
    ///
    /// # Arguments
    ///
    /// * `body` - The response body
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - Parsed document (best effort for broken markup)
    /// * `Err(ParseError)` - The body is binary data rather than text markup
    ///
    /// # Example
    ///
    /// ```
    /// use alyze::document::Document;
    ///
    /// let doc = Document::parse("<html><head><title>Test</title></head></html>").unwrap();
    /// assert_eq!(doc.first_text("title"), Some("Test".to_string()));
    /// ```
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        if body.contains('\0') {
            return Err(ParseError::NotMarkup(
                "body contains NUL bytes (binary content)".to_string(),
            ));
        }

        Ok(Self {
            html: Html::parse_document(body),
        })
    }

    /// An empty document, used when the body could not be parsed
    pub fn empty() -> Self {
        Self {
            html: Html::parse_document(""),
        }
    }

    /// Selects all elements matching a CSS selector, in document order
    ///
    /// An invalid selector matches nothing.
    pub fn select(&self, selector: &str) -> Vec<Node<'_>> {
        match Selector::parse(selector) {
            Ok(selector) => self
                .html
                .select(&selector)
                .map(|element| Node { element })
                .collect(),
            Err(e) => {
                tracing::debug!("Invalid selector '{}': {:?}", selector, e);
                Vec::new()
            }
        }
    }

    /// Counts the elements matching a CSS selector
    pub fn count(&self, selector: &str) -> usize {
        self.select(selector).len()
    }

    /// Returns true if at least one element matches
    pub fn exists(&self, selector: &str) -> bool {
        self.count(selector) > 0
    }

    /// Attribute value of the first matching element
    pub fn first_attr(&self, selector: &str, name: &str) -> Option<String> {
        self.select(selector)
            .first()
            .and_then(|node| node.attr(name))
            .map(str::to_string)
    }

    /// Trimmed text of the first matching element, None if missing or blank
    pub fn first_text(&self, selector: &str) -> Option<String> {
        self.select(selector)
            .first()
            .map(|node| node.text())
            .filter(|text| !text.is_empty())
    }

    /// Trimmed text of every matching element
    pub fn texts(&self, selector: &str) -> Vec<String> {
        self.select(selector).iter().map(Node::text).collect()
    }

    /// Attribute of the root `<html>` element
    pub fn root_attr(&self, name: &str) -> Option<String> {
        self.html
            .root_element()
            .value()
            .attr(name)
            .map(str::to_string)
    }

    /// Raw (untrimmed) text of the `<body>` element, empty if there is none
    pub fn body_text(&self) -> String {
        self.select("body")
            .first()
            .map(|node| node.raw_text())
            .unwrap_or_default()
    }
}

impl<'a> Node<'a> {
    /// Tag name in lowercase
    pub fn name(&self) -> &'a str {
        self.element.value().name()
    }

    /// Concatenated, trimmed text content
    pub fn text(&self) -> String {
        self.raw_text().trim().to_string()
    }

    /// Concatenated text content without trimming
    pub fn raw_text(&self) -> String {
        self.element.text().collect::<String>()
    }

    /// Attribute value, if present (an empty attribute yields `Some("")`)
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Returns true if the attribute is present, whatever its value
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Returns true if this element has at least one element child
    pub fn has_element_children(&self) -> bool {
        self.element
            .children()
            .any(|child| ElementRef::wrap(child).is_some())
    }
}
