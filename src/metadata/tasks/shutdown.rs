//! `SHUTDOWN` tasks.
//!
//! The message and the reboot options are two independent groups, each gated by its own
//! flag. A group is only read when its flag is set, and a set flag without the fields it
//! announces is a malformed document.

use serde::Serialize;

use crate::{
    file::Element,
    metadata::{codes::TaskKind, context::DecodeContext, tasks::TaskSettings},
    Result,
};

use super::TaskDecoder;

/// Message shown to logged on users before the shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShutdownMessage {
    /// The message text
    pub text: String,
    /// How long the message stays on screen, in seconds
    pub duration: String,
}

/// Reboot behaviour when the task restarts the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebootOptions {
    /// Block the job until the agent reports back after the reboot
    pub wait_for_reboot: bool,
}

/// Settings of a shutdown or reboot task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShutdownSettings {
    /// Close applications without asking
    pub force: bool,
    /// Skip the task while users are logged on
    pub check_for_users: bool,
    /// Timeout before the shutdown starts
    pub timeout: String,
    /// Present when the `message` flag is set
    pub message: Option<ShutdownMessage>,
    /// Present when the `reboot` flag is set; `None` means power off
    pub reboot: Option<RebootOptions>,
}

pub(crate) struct ShutdownDecoder;

impl TaskDecoder for ShutdownDecoder {
    fn kind(&self) -> TaskKind {
        TaskKind::Shutdown
    }

    fn decode(&self, settings: &Element, _ctx: &DecodeContext<'_>) -> Result<TaskSettings> {
        let message = if settings.flag("message")? {
            Some(ShutdownMessage {
                text: settings.require_text("messagetext")?,
                duration: settings.require_text("duration")?,
            })
        } else {
            None
        };

        let reboot = if settings.flag("reboot")? {
            Some(RebootOptions {
                wait_for_reboot: settings.flag("waitforreboot")?,
            })
        } else {
            None
        };

        Ok(TaskSettings::Shutdown(ShutdownSettings {
            force: settings.flag("force")?,
            check_for_users: settings.flag("check4users")?,
            timeout: settings.text_or_default("timeout"),
            message,
            reboot,
        }))
    }
}
