//! `COMMAND` and `LINUX_COMMAND` tasks.
//!
//! Both variants share one settings record. Only the Windows variant knows about
//! terminating the process tree and failing on output to stderr; those flags live in
//! [`WindowsCommandOptions`].

use serde::Serialize;

use crate::{
    file::Element,
    metadata::{
        codes::{SyntaxHint, TaskKind},
        context::DecodeContext,
        tasks::TaskSettings,
    },
    Result,
};

use super::TaskDecoder;

/// Placeholder that pulls the script tab into the command line
pub const SCRIPT_PLACEHOLDER: &str = "@[SCRIPT]";

/// Flags only available on Windows agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowsCommandOptions {
    /// Kill child processes together with the command on timeout
    pub terminate_tree: bool,
    /// Fail the task when the command writes to stderr
    pub fail_on_error_output: bool,
}

/// Settings of a command task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSettings {
    /// The command line as entered
    pub command_line: String,
    /// The command line references the script tab
    pub has_script_tab: bool,
    /// Run through the shell (`cmd.exe` or `/bin/sh`)
    pub use_shell: bool,
    /// Capture the command output in the job log
    pub redirect_output: bool,
    /// Fail the task on unexpected exit codes
    pub validate_exit_code: bool,
    /// Timeout in minutes
    pub timeout: String,
    /// Kill the command when the timeout expires
    pub terminate: bool,
    /// Attach the agent log file to the job
    pub grab_log: bool,
    /// Script tab content
    pub script: String,
    /// Extension of the script file written by the agent
    pub script_extension: String,
    /// Highlighting hint derived from `script_extension`
    pub syntax: SyntaxHint,
    /// Present for `COMMAND` tasks only
    pub windows: Option<WindowsCommandOptions>,
}

impl CommandSettings {
    /// The script text if the command line actually runs it
    #[must_use]
    pub fn effective_script(&self) -> Option<&str> {
        self.has_script_tab.then_some(self.script.as_str())
    }
}

pub(crate) struct CommandDecoder {
    pub(crate) kind: TaskKind,
}

impl TaskDecoder for CommandDecoder {
    fn kind(&self) -> TaskKind {
        self.kind
    }

    fn decode(&self, settings: &Element, _ctx: &DecodeContext<'_>) -> Result<TaskSettings> {
        let command_line = settings.require_text("commandline")?;
        let script_extension = settings.text_or_default("scriptext");

        let windows = match self.kind {
            TaskKind::Command => Some(WindowsCommandOptions {
                terminate_tree: settings.flag("terminatetree")?,
                fail_on_error_output: settings.flag("failonerroutput")?,
            }),
            _ => None,
        };

        let command = CommandSettings {
            has_script_tab: command_line.to_uppercase().contains(SCRIPT_PLACEHOLDER),
            use_shell: settings.flag("usecmd")?,
            redirect_output: settings.flag("redirect")?,
            validate_exit_code: settings.flag("validateexitcode")?,
            timeout: settings.text_or_default("timeout"),
            terminate: settings.flag("terminate")?,
            grab_log: settings.flag("grablogfile")?,
            script: settings.text_or_default("script"),
            syntax: SyntaxHint::from_extension(&script_extension),
            script_extension,
            command_line,
            windows,
        };

        Ok(match self.kind {
            TaskKind::LinuxCommand => TaskSettings::LinuxCommand(command),
            _ => TaskSettings::Command(command),
        })
    }
}
