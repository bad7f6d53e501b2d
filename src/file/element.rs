//! Owned element tree and path selection.
//!
//! Paths follow the ElementTree convention used by the exports: the first segment of
//! `properties/guid` matches any descendant, every further segment a direct child.

use serde::Serialize;

use crate::Result;

/// A single XML element with its attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element named `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the text content, builder style
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds an attribute, builder style
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Appends a child element, builder style
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn push_attribute(&mut self, key: String, value: String) {
        self.attributes.push((key, value));
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Drops text that only separates child elements.
    pub(crate) fn normalize_text(&mut self) {
        let drop = match &self.text {
            Some(text) => text.is_empty() || (!self.children.is_empty() && text.trim().is_empty()),
            None => false,
        };
        if drop {
            self.text = None;
        }
    }

    /// The tag name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text content, `None` for empty elements
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Looks up an attribute by key
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the attribute `key` is present, regardless of its value
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == key)
    }

    /// All child elements in document order
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// The first direct child named `name`
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children named `name`
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns every element reached by `path`, in document order.
    ///
    /// The first segment is matched against all descendants (not `self`), the remaining
    /// segments against direct children.
    #[must_use]
    pub fn select(&self, path: &str) -> Vec<&Element> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let Some(first) = segments.next() else {
            return Vec::new();
        };

        let mut current = Vec::new();
        self.collect_descendants(first, &mut current);
        follow_children(current, segments)
    }

    /// Returns every element reached by following `path` through direct children only,
    /// in document order.
    ///
    /// Unlike [`Element::select`] no segment descends further than one level, so fields
    /// of nested items never stand in for fields of `self`.
    #[must_use]
    pub fn select_children(&self, path: &str) -> Vec<&Element> {
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
        if segments.peek().is_none() {
            return Vec::new();
        }
        follow_children(vec![self], segments)
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_descendants(name, out);
        }
    }

    /// The first element reached by `path`, see [`Element::select`]
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.select(path).into_iter().next()
    }

    /// The text of the first element reached by `path`
    #[must_use]
    pub fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path).and_then(Element::text)
    }

    /// Like [`Element::find`], but an absent element is a malformed document
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDocument`] if nothing matches `path`.
    pub fn require(&self, path: &str) -> Result<&Element> {
        self.find(path)
            .ok_or_else(|| malformed_error!("<{}> has no '{}' element", self.name, path))
    }

    /// The text at `path`; the element must exist, empty text reads as ""
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDocument`] if nothing matches `path`.
    pub fn require_text(&self, path: &str) -> Result<String> {
        Ok(self.require(path)?.text().unwrap_or_default().to_string())
    }

    /// The text at `path`, or "" when the element or its text is absent
    #[must_use]
    pub fn text_or_default(&self, path: &str) -> String {
        self.find_text(path).unwrap_or_default().to_string()
    }

    /// The first element reached by `path`, see [`Element::select_children`]
    #[must_use]
    pub fn child_at(&self, path: &str) -> Option<&Element> {
        self.select_children(path).into_iter().next()
    }

    /// The text of the first element reached by `path` through direct children
    #[must_use]
    pub fn child_text(&self, path: &str) -> Option<&str> {
        self.child_at(path).and_then(Element::text)
    }

    /// Like [`Element::child_at`], but an absent element is a malformed document
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDocument`] if nothing matches `path`.
    pub fn require_child(&self, path: &str) -> Result<&Element> {
        self.child_at(path)
            .ok_or_else(|| malformed_error!("<{}> has no '{}' element", self.name, path))
    }

    /// The text at the direct child `path`; the element must exist, empty text reads as ""
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDocument`] if nothing matches `path`.
    pub fn require_child_text(&self, path: &str) -> Result<String> {
        Ok(self.require_child(path)?.text().unwrap_or_default().to_string())
    }

    /// The text at the direct child `path`, or "" when the element or its text is absent
    #[must_use]
    pub fn child_text_or_default(&self, path: &str) -> String {
        self.child_text(path).unwrap_or_default().to_string()
    }

    /// Reads a yes/no flag at the direct child `path`, see [`Element::flag`]
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDocument`] if the element is absent or does not
    /// hold a flag.
    pub fn child_flag(&self, path: &str) -> Result<bool> {
        read_flag(self.require_child(path)?, path)
    }

    /// Reads a yes/no flag at `path`.
    ///
    /// Accepts `yes`/`true`/`1` and `no`/`false`/`0`; an empty element reads as `false`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDocument`] if the element is absent or holds any
    /// other value.
    pub fn flag(&self, path: &str) -> Result<bool> {
        read_flag(self.require(path)?, path)
    }
}

fn follow_children<'a, 's>(
    mut current: Vec<&'a Element>,
    segments: impl Iterator<Item = &'s str>,
) -> Vec<&'a Element> {
    for segment in segments {
        current = current
            .into_iter()
            .flat_map(|e| e.children.iter().filter(move |c| c.name == segment))
            .collect();
    }
    current
}

fn read_flag(element: &Element, path: &str) -> Result<bool> {
    parse_flag(element.text().unwrap_or_default())
        .ok_or_else(|| malformed_error!("'{}' is not a yes/no flag: {:?}", path, element.text()))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" => Some(true),
        "no" | "false" | "0" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sample() -> Element {
        Element::new("module")
            .with_child(
                Element::new("properties")
                    .with_child(Element::new("guid").with_text("{m1}"))
                    .with_child(Element::new("enabled").with_text("yes"))
                    .with_child(
                        Element::new("folder")
                            .with_child(Element::new("name").with_text("Root"))
                            .with_child(Element::new("name").with_text("Sub")),
                    ),
            )
            .with_child(
                Element::new("tasks")
                    .with_child(
                        Element::new("task")
                            .with_attribute("hidden", "yes")
                            .with_child(Element::new("guid").with_text("{t1}")),
                    )
                    .with_child(Element::new("task").with_child(Element::new("guid").with_text("{t2}"))),
            )
    }

    #[test]
    fn select_descends_then_follows_children() {
        let module = sample();
        let names: Vec<_> = module
            .select("folder/name")
            .into_iter()
            .filter_map(Element::text)
            .collect();
        assert_eq!(names, vec!["Root", "Sub"]);

        let guids: Vec<_> = module
            .select("guid")
            .into_iter()
            .filter_map(Element::text)
            .collect();
        assert_eq!(guids, vec!["{m1}", "{t1}", "{t2}"]);

        assert_eq!(module.find_text("properties/guid"), Some("{m1}"));
        assert!(module.find("module").is_none());
        assert!(module.select("").is_empty());
    }

    #[test]
    fn anchored_paths_ignore_nested_items() {
        let module = Element::new("module")
            .with_child(Element::new("properties").with_child(Element::new("name").with_text("Own")))
            .with_child(
                Element::new("tasks").with_child(
                    Element::new("task").with_child(
                        Element::new("properties")
                            .with_child(Element::new("guid").with_text("{task}"))
                            .with_child(Element::new("enabled").with_text("yes")),
                    ),
                ),
            );

        assert_eq!(module.find_text("properties/guid"), Some("{task}"));
        assert_eq!(module.child_text("properties/guid"), None);
        assert_eq!(module.child_text("properties/name"), Some("Own"));
        assert!(matches!(
            module.require_child_text("properties/guid"),
            Err(Error::MalformedDocument { .. })
        ));
        assert!(module.child_flag("properties/enabled").is_err());
        assert_eq!(module.child_text_or_default("properties/guid"), "");
        assert_eq!(module.select_children("tasks/task/properties/guid").len(), 1);
        assert!(module.select_children("").is_empty());
        assert!(module.child_at("task").is_none());
    }

    #[test]
    fn attributes_and_children() {
        let module = sample();
        let tasks = module.child("tasks").unwrap();
        let hidden: Vec<_> = tasks
            .children_named("task")
            .map(|t| t.has_attribute("hidden"))
            .collect();
        assert_eq!(hidden, vec![true, false]);
        assert_eq!(
            tasks.children().next().unwrap().attribute("hidden"),
            Some("yes")
        );
    }

    #[test]
    fn required_fields() {
        let module = sample();
        assert_eq!(module.require_text("properties/guid").unwrap(), "{m1}");
        assert!(matches!(
            module.require_text("properties/version"),
            Err(Error::MalformedDocument { .. })
        ));
        assert_eq!(module.text_or_default("properties/version"), "");
    }

    #[test]
    fn flags() {
        let module = sample();
        assert!(module.flag("properties/enabled").unwrap());

        let odd = Element::new("x").with_child(Element::new("f").with_text("maybe"));
        assert!(odd.flag("f").is_err());

        let empty = Element::new("x").with_child(Element::new("f"));
        assert!(!empty.flag("f").unwrap());
        assert!(empty.flag("missing").is_err());
    }
}
