//! Typed records extracted from the three top level collections.
//!
//! Every extractor is a pure function from one raw element to one record. Failures after
//! the GUID of the entity is known are wrapped into an [`crate::Error::Entity`] frame that
//! names the entity.
mod module;
mod parameter;
mod project;
mod resource;

pub use module::{extract_module, Module};
pub use parameter::{extract_parameter, extract_parameters, Parameter};
pub use project::{extract_project, Project, ProjectModuleRef};
pub use resource::{extract_resource, resource_label, Resource, ResourceDetails, ResourceRef};

use std::fmt;

use serde::{Serialize, Serializer};

use crate::file::Element;

/// Folder location of an entity inside the exporting console.
///
/// Segments are kept in order; [`fmt::Display`] joins them with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPath(Vec<String>);

impl FolderPath {
    /// Collects the `properties/folder/name` segments of `element`
    #[must_use]
    pub fn from_element(element: &Element) -> FolderPath {
        FolderPath(
            element
                .select_children("properties/folder/name")
                .into_iter()
                .map(|name| name.text().unwrap_or_default().to_string())
                .collect(),
        )
    }

    /// The individual path segments
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns true for entities at the top level
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl Serialize for FolderPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reads the GUID every entity must carry.
pub(crate) fn entity_guid(element: &Element) -> crate::Result<String> {
    let guid = element.require_child_text("properties/guid")?;
    let guid = guid.trim();
    if guid.is_empty() {
        return Err(malformed_error!("<{}> has an empty GUID", element.name()));
    }
    Ok(guid.to_string())
}
