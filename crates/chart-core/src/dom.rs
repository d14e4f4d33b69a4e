// File: crates/chart-core/src/dom.rs
// Summary: Minimal element tree standing in for the host page: mount points, attributes, markup output.
// Notes:
// - Attribute order is insertion order so serialized markup is stable.
// - `class` is stored as a regular attribute; `classed` edits it token-wise.

use std::fmt::Write as _;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: Option<String>,
    inner_html: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    // -- builder-style ---------------------------------------------------------

    pub fn with_attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_id(self, id: &str) -> Self { self.with_attr("id", id) }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classed(class, true);
        self
    }

    pub fn with_style(mut self, name: &str, value: impl ToString) -> Self {
        self.set_style(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    // -- accessors ---------------------------------------------------------------

    pub fn tag(&self) -> &str { &self.tag }
    pub fn children(&self) -> &[Element] { &self.children }
    pub fn text(&self) -> Option<&str> { self.text.as_deref() }
    pub fn inner_html(&self) -> Option<&str> { self.inner_html.as_deref() }
    pub fn id(&self) -> Option<&str> { self.attr("id") }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn set_style(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.styles.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.styles.push((name.to_string(), value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class").map_or(false, |c| c.split_whitespace().any(|t| t == class))
    }

    /// Add or remove one class token, leaving the others untouched.
    pub fn classed(&mut self, class: &str, on: bool) {
        let mut tokens: Vec<String> = self
            .attr("class")
            .map(|c| c.split_whitespace().filter(|t| *t != class).map(str::to_string).collect())
            .unwrap_or_default();
        if on { tokens.push(class.to_string()); }
        if tokens.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", tokens.join(" "));
        }
    }

    /// Replace all content with a text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.inner_html = None;
        self.text = Some(text.into());
    }

    /// Replace all content with pre-rendered markup.
    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.children.clear();
        self.text = None;
        self.inner_html = Some(html.into());
    }

    /// Append a child and return a handle to it for further building.
    pub fn append(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn clear(&mut self) {
        self.children.clear();
        self.text = None;
        self.inner_html = None;
    }

    // -- queries -----------------------------------------------------------------

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) { return Some(self); }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) { return Some(self); }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    /// Depth-first, document order, including `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for c in &self.children { out.extend(c.descendants()); }
        out
    }

    /// Match a simple selector: `tag`, `.class`, `#id` or `tag.class`.
    pub fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            return self.id() == Some(id);
        }
        match selector.split_once('.') {
            Some(("", class)) => self.has_class(class),
            Some((tag, class)) => self.tag == tag && self.has_class(class),
            None => self.tag == selector,
        }
    }

    pub fn query_all(&self, selector: &str) -> Vec<&Element> {
        self.descendants().into_iter().filter(|e| e.matches(selector)).collect()
    }

    /// First match in document order, including `self`.
    pub fn query_first_mut(&mut self, selector: &str) -> Option<&mut Element> {
        if self.matches(selector) { return Some(self); }
        self.children.iter_mut().find_map(|c| c.query_first_mut(selector))
    }

    // -- markup ------------------------------------------------------------------

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", k, escape(v));
        }
        if !self.styles.is_empty() {
            let css = self.styles.iter().map(|(k, v)| format!("{k}: {v};")).collect::<Vec<_>>().join(" ");
            let _ = write!(out, " style=\"{}\"", escape(&css));
        }
        out.push('>');
        if let Some(t) = &self.text { out.push_str(&escape(t)); }
        if let Some(h) = &self.inner_html { out.push_str(h); }
        for c in &self.children { c.write_markup(out); }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// The host page: a body holding the chart and tooltip mount points.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub title: String,
    body: Element,
}

impl Document {
    /// Id of the element the chart is mounted into.
    pub const CHART_ID: &'static str = "chart";
    /// Id of the single tooltip element.
    pub const TOOLTIP_ID: &'static str = "tooltip";

    /// Page with a heading and both mount points, in the order the chart expects.
    pub fn page(title: impl Into<String>) -> Self {
        let title = title.into();
        let mut body = Element::new("body");
        body.append(Element::new("h1").with_id("title").with_text(title.clone()));
        body.append(Element::new("div").with_id(Self::CHART_ID));
        body.append(Element::new("div").with_id(Self::TOOLTIP_ID).with_class("tooltip"));
        Self { title, body }
    }

    /// Page without any mount points.
    pub fn empty() -> Self {
        Self { title: String::new(), body: Element::new("body") }
    }

    pub fn body(&self) -> &Element { &self.body }
    pub fn body_mut(&mut self) -> &mut Element { &mut self.body }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_by_id_mut(id)
    }

    pub fn query_all(&self, selector: &str) -> Vec<&Element> {
        self.body.query_all(selector)
    }

    /// Full standalone HTML page with the given stylesheet inlined.
    pub fn to_html(&self, stylesheet: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}\n</style>\n</head>\n{}\n</html>\n",
            escape(&self.title),
            stylesheet,
            self.body.to_markup()
        )
    }
}

/// Escape text for use in markup content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
