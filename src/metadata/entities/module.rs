use serde::Serialize;

use crate::{
    error::EntityKind,
    file::Element,
    metadata::{
        context::DecodeContext,
        entities::{extract_parameters, FolderPath, Parameter},
        tasks::{decode_task, Task},
    },
    Result,
};

use super::entity_guid;

/// A module: an ordered list of tasks plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Unique key within the modules collection
    pub guid: String,
    /// Module name
    pub title: String,
    /// Whether the module is enabled
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
    /// Visible tasks in document order
    pub tasks: Vec<Task>,
}

/// Extracts a module and decodes all of its visible tasks.
///
/// Tasks carrying a `hidden` attribute are skipped before decoding. Module parameters are
/// stored by the exporting product below the first `tasks/task/parameters` node, which
/// may belong to a hidden task.
///
/// # Errors
/// Returns the first failure of a field read or a task decoder, wrapped with the module
/// GUID.
pub fn extract_module(element: &Element, ctx: &DecodeContext<'_>) -> Result<Module> {
    let guid = entity_guid(element)?;
    decode_module(element, ctx, guid.clone()).map_err(|e| e.in_entity(EntityKind::Module, &guid))
}

fn decode_module(element: &Element, ctx: &DecodeContext<'_>, guid: String) -> Result<Module> {
    let tasks = match element.child("tasks") {
        Some(tasks) => tasks
            .children_named("task")
            .filter(|task| !task.has_attribute("hidden"))
            .map(|task| decode_task(task, ctx))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(Module {
        guid,
        title: element.require_child_text("properties/name")?,
        enabled: element.child_flag("properties/enabled")?,
        description: element.child_text_or_default("properties/description"),
        version: element.child_text_or_default("properties/version"),
        version_comment: element.child_text_or_default("properties/versioncomment"),
        folder_path: FolderPath::from_element(element),
        parameters: extract_parameters(element.child_at("tasks/task/parameters"))?,
        tasks,
    })
}
