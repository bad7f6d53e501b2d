//! `PWRSHELL` tasks.
//!
//! The script either lives inline on the task's script tab (`usescript=yes`) or in a
//! resource file. Resource backed code is not stored in the export and is reported as
//! unavailable.

use serde::Serialize;

use crate::{
    file::Element,
    metadata::{codes::TaskKind, context::DecodeContext, tasks::TaskSettings},
    Result,
};

use super::TaskDecoder;

/// Where the PowerShell code of a task comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PowerShellSource {
    /// Code entered on the script tab
    Inline {
        /// The script text
        script: String,
    },
    /// Code read from a resource at run time; the export does not contain it
    ResourceFile {
        /// File name of the resource
        resource_name: String,
        /// GUID of the resource
        resource_guid: String,
    },
}

impl PowerShellSource {
    /// Label of the origin as shown by the console
    #[must_use]
    pub fn origin(&self) -> &'static str {
        match self {
            PowerShellSource::Inline { .. } => "Script Tab",
            PowerShellSource::ResourceFile { .. } => "Resource File",
        }
    }

    /// The script text, `None` when the code lives in an external resource
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        match self {
            PowerShellSource::Inline { script } => Some(script),
            PowerShellSource::ResourceFile { .. } => None,
        }
    }
}

pub(crate) struct PowerShellDecoder;

impl TaskDecoder for PowerShellDecoder {
    fn kind(&self) -> TaskKind {
        TaskKind::PowerShell
    }

    fn decode(&self, settings: &Element, _ctx: &DecodeContext<'_>) -> Result<TaskSettings> {
        let source = if settings.flag("usescript")? {
            PowerShellSource::Inline {
                script: settings.require_text("source")?,
            }
        } else {
            PowerShellSource::ResourceFile {
                resource_name: settings.require_text("resourcename")?,
                resource_guid: settings.require_text("resourceguid")?,
            }
        };
        Ok(TaskSettings::PowerShell(source))
    }
}
