use serde::Serialize;

use crate::{
    error::EntityKind,
    file::Element,
    metadata::{codes::ResourceKind, entities::FolderPath},
    Result,
};

use super::entity_guid;

/// Kind specific resource properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResourceDetails {
    /// Content stored in the automation database
    Database {
        /// Replace variables inside the file content on deployment
        parse_file_content: bool,
        /// Leave environment variables unexpanded while parsing
        skip_environment_variables: bool,
        /// Checksum of the stored content
        crc32: String,
    },
    /// File located on a share
    Fileshare {
        /// UNC path of the file
        path: String,
    },
    /// Resource package
    AutomationPackage {
        /// Package name
        display_name: String,
        /// Checksum of the package
        crc32: String,
    },
    /// File downloaded from a URL
    UrlResource {
        /// Download location
        source_url: String,
    },
}

/// A resource of the building block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Unique key within the resources collection
    pub guid: String,
    /// Resource kind
    pub kind: ResourceKind,
    /// Human readable label of the kind
    pub kind_label: &'static str,
    /// Display label, see [`resource_label`]
    pub name: String,
    /// Version number
    pub version: String,
    /// Comment attached to the version
    pub version_comment: String,
    /// Whether the resource is enabled
    pub enabled: bool,
    /// Free text comment
    pub comment: String,
    /// Console folder
    pub folder_path: FolderPath,
    /// Kind specific properties
    pub details: ResourceDetails,
}

/// Lightweight view of a resource referenced from a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    /// GUID of the referenced resource
    pub guid: String,
    /// Display label of the referenced resource
    pub name: String,
    /// Kind of the referenced resource
    pub kind: ResourceKind,
}

impl ResourceRef {
    /// Builds a reference from a raw resource element
    ///
    /// # Errors
    /// Fails like [`resource_label`], or if the element has no GUID.
    pub fn from_element(element: &Element) -> Result<ResourceRef> {
        let kind = ResourceKind::from_code(&element.require_child_text("properties/type")?)?;
        Ok(ResourceRef {
            guid: entity_guid(element)?,
            name: resource_label(element, kind)?,
            kind,
        })
    }
}

/// Display label of a resource element.
///
/// Packages are labelled by their `name` property, every other kind by its `file`
/// property.
///
/// # Errors
/// Returns [`crate::Error::MalformedDocument`] if the labelling property is absent.
pub fn resource_label(element: &Element, kind: ResourceKind) -> Result<String> {
    element.require_child_text(&format!("properties/{}", kind.label_property()))
}

/// Extracts a resource record.
///
/// # Errors
///
/// - [`crate::Error::MalformedDocument`] if the GUID, type, label or a kind specific
///   property is missing
/// - [`crate::Error::UnknownCode`] if the resource type is not one of the four known kinds
pub fn extract_resource(element: &Element) -> Result<Resource> {
    let guid = entity_guid(element)?;
    decode_resource(element, guid.clone()).map_err(|e| e.in_entity(EntityKind::Resource, &guid))
}

fn decode_resource(element: &Element, guid: String) -> Result<Resource> {
    let kind = ResourceKind::from_code(&element.require_child_text("properties/type")?)?;

    let details = match kind {
        ResourceKind::Database => ResourceDetails::Database {
            parse_file_content: element.child_flag("properties/parsefilecontent")?,
            skip_environment_variables: element.child_flag("properties/skipenvironmentvariables")?,
            crc32: element.child_text_or_default("properties/crc32"),
        },
        ResourceKind::Fileshare => ResourceDetails::Fileshare {
            path: element.require_child_text("properties/path")?,
        },
        ResourceKind::AutomationPackage => ResourceDetails::AutomationPackage {
            display_name: element.require_child_text("properties/name")?,
            crc32: element.child_text_or_default("properties/crc32"),
        },
        ResourceKind::UrlResource => ResourceDetails::UrlResource {
            source_url: element.require_child_text("properties/urlresource")?,
        },
    };

    Ok(Resource {
        guid,
        kind,
        kind_label: kind.display_name(),
        name: resource_label(element, kind)?,
        version: element.child_text_or_default("properties/version"),
        version_comment: element.child_text_or_default("properties/versioncomment"),
        enabled: element.child_flag("properties/enabled")?,
        comment: element.child_text_or_default("properties/comment"),
        folder_path: FolderPath::from_element(element),
        details,
    })
}
