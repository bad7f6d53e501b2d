//! Task decoding.
//!
//! Every task carries a type tag in `properties/type` and a `settings` element whose shape
//! depends on that tag. Decoding is a single lookup in a static table of
//! [`TaskDecoder`] implementations, one per supported tag. Tags without a decoder produce
//! a [`Task`] with the common fields only.
//!
//! # Supported tags
//! - `PWRSHELL` - [`powershell`]
//! - `SHUTDOWN` - [`shutdown`]
//! - `DOWNLOAD`, `LINUX_DOWNLOAD` - [`download`]
//! - `FILEOPERATIONS` - [`fileoperations`]
//! - `REGISTRY` - [`registry`]
//! - `SECURITY` - [`security`]
//! - `COMMAND`, `LINUX_COMMAND` - [`command`]
pub mod command;
pub mod download;
pub mod fileoperations;
pub mod powershell;
pub mod registry;
pub mod security;
pub mod shutdown;

use serde::Serialize;

use crate::{
    error::EntityKind,
    file::Element,
    metadata::{
        codes::{task_display_name, TaskKind},
        context::DecodeContext,
    },
    Result,
};

pub use command::{CommandSettings, WindowsCommandOptions};
pub use download::DownloadSettings;
pub use fileoperations::{FileOperation, FileOperationKind};
pub use powershell::PowerShellSource;
pub use registry::RegistrySettings;
pub use security::{AccessRight, SecurityPermission, SecuritySettings};
pub use shutdown::{RebootOptions, ShutdownMessage, ShutdownSettings};

static DECODERS: [&'static dyn TaskDecoder; 9] = [
    &powershell::PowerShellDecoder,
    &shutdown::ShutdownDecoder,
    &download::DownloadDecoder {
        kind: TaskKind::Download,
    },
    &download::DownloadDecoder {
        kind: TaskKind::LinuxDownload,
    },
    &fileoperations::FileOperationsDecoder,
    &registry::RegistryDecoder,
    &security::SecurityDecoder,
    &command::CommandDecoder {
        kind: TaskKind::Command,
    },
    &command::CommandDecoder {
        kind: TaskKind::LinuxCommand,
    },
];

/// Decoder for the settings of one task type.
trait TaskDecoder: Send + Sync {
    /// The task type handled by this decoder.
    fn kind(&self) -> TaskKind;

    /// Decode the `settings` element of a task.
    ///
    /// # Arguments
    /// * `settings` - The `settings` element of the task
    /// * `ctx` - Cross-reference indices of the document
    fn decode(&self, settings: &Element, ctx: &DecodeContext<'_>) -> Result<TaskSettings>;
}

fn decoder_for(tag: &str) -> Option<&'static dyn TaskDecoder> {
    let kind = TaskKind::from_tag(tag)?;
    DECODERS.iter().copied().find(|decoder| decoder.kind() == kind)
}

/// Type specific settings of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TaskSettings {
    /// `PWRSHELL`
    PowerShell(PowerShellSource),
    /// `SHUTDOWN`
    Shutdown(ShutdownSettings),
    /// `DOWNLOAD`
    Download(DownloadSettings),
    /// `LINUX_DOWNLOAD`
    LinuxDownload(DownloadSettings),
    /// `FILEOPERATIONS`
    FileOperations(Vec<FileOperation>),
    /// `REGISTRY`
    Registry(RegistrySettings),
    /// `SECURITY`
    Security(SecuritySettings),
    /// `COMMAND`
    Command(CommandSettings),
    /// `LINUX_COMMAND`
    LinuxCommand(CommandSettings),
}

impl TaskSettings {
    /// Label that replaces the generic task type label, if the settings provide a more
    /// specific one
    #[must_use]
    pub fn display_name_override(&self) -> Option<&'static str> {
        match self {
            TaskSettings::Security(security) => Some(security.object_type.label()),
            _ => None,
        }
    }
}

/// A decoded task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Task GUID
    pub guid: String,
    /// Raw type tag
    pub task_type: String,
    /// Human readable label
    pub display_name: String,
    /// Whether the task is enabled
    pub enabled: bool,
    /// Type specific settings, `None` for unrecognized task types
    pub settings: Option<TaskSettings>,
}

impl Task {
    /// Returns true if the task type has no decoder
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.settings.is_none()
    }
}

/// Decodes one task element.
///
/// # Errors
/// Returns [`crate::Error::MalformedDocument`] if the common properties are missing, or
/// the failure of the type specific decoder wrapped with the task GUID and type.
pub fn decode_task(element: &Element, ctx: &DecodeContext<'_>) -> Result<Task> {
    let task_type = element.require_child_text("properties/type")?.trim().to_string();
    let guid = element.require_child_text("properties/guid")?.trim().to_string();

    decode_settings(element, ctx, &task_type, guid.clone())
        .map_err(|e| e.in_entity(EntityKind::Task(task_type.clone()), &guid))
}

fn decode_settings(
    element: &Element,
    ctx: &DecodeContext<'_>,
    task_type: &str,
    guid: String,
) -> Result<Task> {
    let enabled = element.child_flag("properties/enabled")?;
    let mut display_name = task_display_name(task_type);

    let settings = match decoder_for(task_type) {
        Some(decoder) => {
            let settings_root = element
                .child("settings")
                .ok_or_else(|| malformed_error!("{} task has no settings", task_type))?;
            Some(decoder.decode(settings_root, ctx)?)
        }
        None => {
            tracing::warn!(guid = %guid, task_type, "no decoder for task type");
            None
        }
    };

    if let Some(label) = settings
        .as_ref()
        .and_then(TaskSettings::display_name_override)
    {
        display_name = label.to_string();
    }

    Ok(Task {
        guid,
        task_type: task_type.to_string(),
        display_name,
        enabled,
        settings,
    })
}
