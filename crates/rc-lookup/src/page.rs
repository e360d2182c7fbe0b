//! Parsed HTML page with the small set of tree queries the extractor needs.
//!
//! Everything here is predicate based: find the first element with a tag
//! that satisfies a closure, walk up to an ancestor, walk down to a
//! descendant, read text. The lookup site has no stable ids or schema, so
//! the extractor composes these primitives rather than CSS selectors.

use scraper::{ElementRef, Html, Node};

/// A parsed HTML document.
pub struct Page {
    document: Html,
}

impl Page {
    /// Parse a full HTML document. Malformed markup never fails; the parser
    /// recovers the same way a browser would.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.document
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
    }

    /// First element in document order named `tag` for which `pred` holds.
    pub fn find<P>(&self, tag: &str, pred: P) -> Option<ElementRef<'_>>
    where
        P: Fn(&ElementRef<'_>) -> bool,
    {
        self.elements().find(|el| el.value().name() == tag && pred(el))
    }
}

/// Tree queries on a single element.
pub trait ElementExt<'a> {
    /// Text of the element when it has exactly one child and that child is
    /// text, or is an element which itself has an own string.
    fn own_string(&self) -> Option<String>;

    /// All descendant text nodes, each trimmed, empty ones dropped,
    /// concatenated without a separator.
    fn stripped_text(&self) -> String;

    /// Whether the `class` attribute contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Nearest ancestor named `tag`. The element itself is not considered.
    fn find_ancestor(&self, tag: &str) -> Option<ElementRef<'a>>;

    /// First descendant in document order named `tag` for which `pred` holds.
    /// The element itself is not considered.
    fn find_descendant<P>(&self, tag: &str, pred: P) -> Option<ElementRef<'a>>
    where
        P: Fn(&ElementRef<'a>) -> bool;
}

impl<'a> ElementExt<'a> for ElementRef<'a> {
    fn own_string(&self) -> Option<String> {
        let mut children = self.children();
        let only = children.next()?;
        if children.next().is_some() {
            return None;
        }
        match only.value() {
            Node::Text(text) => Some((**text).to_string()),
            Node::Element(_) => ElementRef::wrap(only)?.own_string(),
            _ => None,
        }
    }

    fn stripped_text(&self) -> String {
        self.text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn find_ancestor(&self, tag: &str) -> Option<ElementRef<'a>> {
        self.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == tag)
    }

    fn find_descendant<P>(&self, tag: &str, pred: P) -> Option<ElementRef<'a>>
    where
        P: Fn(&ElementRef<'a>) -> bool,
    {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == tag && pred(el))
    }
}
