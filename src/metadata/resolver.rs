//! GUID based cross-reference resolution.
//!
//! Tasks and projects reference resources and modules by GUID. A [`GuidIndex`] is built once
//! per collection and answers every lookup against that collection in constant time. The
//! index only borrows the raw tree, so references can be resolved before, or while, the
//! referenced entities are decoded.
//!
//! # Examples
//!
//! ```rust
//! use bbscope::{Document, metadata::resolver::{Collection, GuidIndex}};
//!
//! let doc = Document::parse(
//!     "<buildingblock><modules>\
//!        <module><properties><guid>{A}</guid><name>First</name></properties></module>\
//!      </modules></buildingblock>",
//! )?;
//! let modules = doc.root().child("modules").unwrap();
//! let index = GuidIndex::build(Collection::Modules, modules)?;
//!
//! let module = index.resolve("{A}")?;
//! assert_eq!(module.find_text("properties/name"), Some("First"));
//! assert!(index.resolve("{B}").is_err());
//! # Ok::<(), bbscope::Error>(())
//! ```

use std::collections::HashMap;

use serde::Serialize;
use strum::Display;

use crate::{file::Element, Error, Result};

/// The three top level collections of a building block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Collection {
    /// `buildingblock/resources`
    #[strum(serialize = "resources")]
    Resources,
    /// `buildingblock/modules`
    #[strum(serialize = "modules")]
    Modules,
    /// `buildingblock/projects`
    #[strum(serialize = "projects")]
    Projects,
}

impl Collection {
    /// Tag of the collection element below the root
    #[must_use]
    pub fn root_name(self) -> &'static str {
        match self {
            Collection::Resources => "resources",
            Collection::Modules => "modules",
            Collection::Projects => "projects",
        }
    }

    /// Tag of the items inside the collection element
    #[must_use]
    pub fn item_name(self) -> &'static str {
        match self {
            Collection::Resources => "resource",
            Collection::Modules => "module",
            Collection::Projects => "project",
        }
    }
}

enum Slot<'a> {
    Unique(&'a Element),
    Ambiguous(usize),
}

/// Read-only GUID index over the items of one collection.
///
/// Building the index is the only step that touches the collection; afterwards the index
/// is `Sync` and can be shared between worker threads without locking.
pub struct GuidIndex<'a> {
    collection: Collection,
    entries: HashMap<&'a str, Slot<'a>>,
}

impl<'a> GuidIndex<'a> {
    /// Indexes every item of `root` by its `properties/guid`.
    ///
    /// # Arguments
    ///
    /// * `collection` - Which collection `root` is, used for diagnostics
    /// * `root` - The collection element, e.g. `buildingblock/resources`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] if `root` holds anything but items of the
    /// collection.
    pub fn build(collection: Collection, root: &'a Element) -> Result<GuidIndex<'a>> {
        let mut entries: HashMap<&'a str, Slot<'a>> = HashMap::new();

        for item in root.children() {
            if item.name() != collection.item_name() {
                return Err(malformed_error!(
                    "<{}> contains unexpected <{}>",
                    collection.root_name(),
                    item.name()
                ));
            }

            // Items without a GUID cannot be referenced, extraction reports them
            let Some(guid) = item
                .child_text("properties/guid")
                .map(str::trim)
                .filter(|guid| !guid.is_empty())
            else {
                continue;
            };

            entries
                .entry(guid)
                .and_modify(|slot| {
                    let count = match slot {
                        Slot::Unique(_) => 2,
                        Slot::Ambiguous(count) => *count + 1,
                    };
                    *slot = Slot::Ambiguous(count);
                })
                .or_insert(Slot::Unique(item));
        }

        Ok(GuidIndex {
            collection,
            entries,
        })
    }

    /// An index over nothing, used for absent collections
    #[must_use]
    pub fn empty(collection: Collection) -> GuidIndex<'a> {
        GuidIndex {
            collection,
            entries: HashMap::new(),
        }
    }

    /// The indexed collection
    #[must_use]
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Returns the single item carrying `guid`.
    ///
    /// # Errors
    ///
    /// - [`Error::ReferenceNotFound`] if no item carries `guid`
    /// - [`Error::AmbiguousReference`] if more than one item carries `guid`
    pub fn resolve(&self, guid: &str) -> Result<&'a Element> {
        let guid = guid.trim();
        match self.entries.get(guid) {
            Some(Slot::Unique(element)) => Ok(*element),
            Some(Slot::Ambiguous(count)) => Err(Error::AmbiguousReference {
                collection: self.collection,
                guid: guid.to_string(),
                count: *count,
            }),
            None => Err(Error::ReferenceNotFound {
                collection: self.collection,
                guid: guid.to_string(),
            }),
        }
    }

    /// GUIDs that occur more than once, with their number of occurrences
    #[must_use]
    pub fn duplicates(&self) -> Vec<(&'a str, usize)> {
        let mut duplicates: Vec<_> = self
            .entries
            .iter()
            .filter_map(|(guid, slot)| match slot {
                Slot::Ambiguous(count) => Some((*guid, *count)),
                Slot::Unique(_) => None,
            })
            .collect();
        duplicates.sort_unstable();
        duplicates
    }

    /// Number of distinct GUIDs
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the collection had no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::resource_xml;
    use crate::Document;

    fn resources(items: &[String]) -> Document {
        Document::parse(&format!(
            "<resources>{}</resources>",
            items.concat()
        ))
        .unwrap()
    }

    #[test]
    fn resolves_unique() {
        let doc = resources(&[
            resource_xml("{1}", "FILESHARE", "a.txt"),
            resource_xml("{2}", "DATABASE", "b.txt"),
        ]);
        let index = GuidIndex::build(Collection::Resources, doc.root()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.resolve("{2}").unwrap().child_text("properties/file"),
            Some("b.txt")
        );
        assert!(index.duplicates().is_empty());
    }

    #[test]
    fn missing_and_ambiguous() {
        let doc = resources(&[
            resource_xml("{1}", "FILESHARE", "a.txt"),
            resource_xml("{1}", "FILESHARE", "b.txt"),
            resource_xml("{1}", "FILESHARE", "c.txt"),
        ]);
        let index = GuidIndex::build(Collection::Resources, doc.root()).unwrap();

        assert!(matches!(
            index.resolve("{1}"),
            Err(Error::AmbiguousReference { count: 3, .. })
        ));
        assert!(matches!(
            index.resolve("{9}"),
            Err(Error::ReferenceNotFound {
                collection: Collection::Resources,
                ref guid
            }) if guid == "{9}"
        ));
        assert_eq!(index.duplicates(), vec![("{1}", 3)]);
    }

    #[test]
    fn indexes_only_own_guid() {
        let doc = Document::parse(
            "<modules><module><properties><name>NoGuid</name></properties>\
               <tasks><task hidden=\"yes\"><properties><guid>{TASK}</guid></properties></task></tasks>\
             </module></modules>",
        )
        .unwrap();
        let index = GuidIndex::build(Collection::Modules, doc.root()).unwrap();
        assert!(index.is_empty());
        assert!(matches!(
            index.resolve("{TASK}"),
            Err(Error::ReferenceNotFound { .. })
        ));
    }

    #[test]
    fn rejects_foreign_items() {
        let doc = Document::parse("<resources><module/></resources>").unwrap();
        assert!(matches!(
            GuidIndex::build(Collection::Resources, doc.root()),
            Err(Error::MalformedDocument { .. })
        ));

        let doc = Document::parse("<resources><resource><properties/></resource></resources>")
            .unwrap();
        assert!(GuidIndex::build(Collection::Resources, doc.root())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn empty_index() {
        let index = GuidIndex::empty(Collection::Modules);
        assert!(index.is_empty());
        assert!(matches!(
            index.resolve("{1}"),
            Err(Error::ReferenceNotFound {
                collection: Collection::Modules,
                ..
            })
        ));
    }
}
