use serde::Serialize;

use crate::{
    error::EntityKind,
    file::Element,
    metadata::{
        context::DecodeContext,
        entities::{extract_parameters, FolderPath, Parameter},
    },
    Result,
};

use super::entity_guid;

/// A module as referenced from a project.
///
/// `enabled` belongs to the reference: the same module can be enabled in one project and
/// disabled in another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectModuleRef {
    /// GUID of the referenced module
    pub guid: String,
    /// Name of the referenced module, resolved from the modules collection
    pub name: String,
    /// Whether the module runs as part of this project
    pub enabled: bool,
}

/// A project: an ordered list of module references plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Unique key within the projects collection
    pub guid: String,
    /// Project name
    pub title: String,
    /// Whether the project is enabled
    pub enabled: bool,
    /// Free text description
    pub description: String,
    /// Version number
    pub version: String,
    /// Comment attached to the version
    pub version_comment: String,
    /// Console folder
    pub folder_path: FolderPath,
    /// Parameters, sorted by name
    pub parameters: Vec<Parameter>,
    /// Module references in document order
    pub modules: Vec<ProjectModuleRef>,
}

/// Extracts a project and resolves its module references.
///
/// # Errors
/// Returns the first failure of a field read or of a module reference resolution
/// ([`crate::Error::ReferenceNotFound`], [`crate::Error::AmbiguousReference`]), wrapped
/// with the project GUID.
pub fn extract_project(element: &Element, ctx: &DecodeContext<'_>) -> Result<Project> {
    let guid = entity_guid(element)?;
    decode_project(element, ctx, guid.clone())
        .map_err(|e| e.in_entity(EntityKind::Project, &guid))
}

fn decode_project(element: &Element, ctx: &DecodeContext<'_>, guid: String) -> Result<Project> {
    let modules = match element.child("modules") {
        Some(modules) => modules
            .children()
            .map(|reference| module_ref(reference, ctx))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(Project {
        guid,
        title: element.require_child_text("properties/name")?,
        enabled: element.child_flag("properties/enabled")?,
        description: element.child_text_or_default("properties/description"),
        version: element.child_text_or_default("properties/version"),
        version_comment: element.child_text_or_default("properties/versioncomment"),
        folder_path: FolderPath::from_element(element),
        parameters: extract_parameters(element.child_at("properties/parameters"))?,
        modules,
    })
}

fn module_ref(reference: &Element, ctx: &DecodeContext<'_>) -> Result<ProjectModuleRef> {
    let guid = reference.require_child_text("guid")?.trim().to_string();
    let module = ctx.modules().resolve(&guid)?;

    Ok(ProjectModuleRef {
        name: module.require_child_text("properties/name")?,
        enabled: reference.child_flag("enabled")?,
        guid,
    })
}
