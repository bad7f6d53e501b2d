//! Lookup tables for the numeric and textual codes used by building block exports.
//!
//! Each code space has its own fallback policy:
//!
//! | Code space | Unknown value |
//! |---|---|
//! | Task type | `"Unknown (<tag>)"` label |
//! | Parameter type | `"Unknown"` |
//! | Script extension | [`SyntaxHint::None`] |
//! | Resource type | [`crate::Error::UnknownCode`] |
//! | Security object type | [`crate::Error::UnknownCode`] |
//! | Permission action | [`crate::Error::UnknownCode`] |
//! | Access mask | [`crate::Error::UnknownCode`] |
//!
//! Open spaces grow with new versions of the exporting product, closed spaces are
//! security relevant or structural and must never be guessed.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Identifies a code space in [`Error::UnknownCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CodeSpace {
    /// Task type tags
    #[strum(serialize = "task type")]
    TaskType,
    /// Resource type tags
    #[strum(serialize = "resource type")]
    ResourceType,
    /// Parameter type codes
    #[strum(serialize = "parameter type")]
    ParameterType,
    /// Securable object types of SECURITY tasks
    #[strum(serialize = "security object type")]
    SecurityObjectType,
    /// Allow / deny / delete
    #[strum(serialize = "permission action")]
    PermissionAction,
    /// Access mask values
    #[strum(serialize = "access mask")]
    AccessMask,
}

fn unknown(space: CodeSpace, code: &str) -> Error {
    Error::UnknownCode {
        space,
        code: code.to_string(),
    }
}

/// The task types this crate knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum TaskKind {
    /// Execute a PowerShell script
    #[strum(serialize = "PWRSHELL")]
    PowerShell,
    /// Execute a command on Windows
    #[strum(serialize = "COMMAND")]
    Command,
    /// Download resources to a Windows agent
    #[strum(serialize = "DOWNLOAD")]
    Download,
    /// Shut down or reboot the agent
    #[strum(serialize = "SHUTDOWN")]
    Shutdown,
    /// Import a registry patch
    #[strum(serialize = "REGISTRY")]
    Registry,
    /// Copy, move, rename or delete files
    #[strum(serialize = "FILEOPERATIONS")]
    FileOperations,
    /// Set permissions on files, registry keys, shares or printers
    #[strum(serialize = "SECURITY")]
    Security,
    /// Execute a command on UNIX/Linux
    #[strum(serialize = "LINUX_COMMAND")]
    LinuxCommand,
    /// Download resources to a UNIX/Linux agent
    #[strum(serialize = "LINUX_DOWNLOAD")]
    LinuxDownload,
}

impl TaskKind {
    /// Looks up a task kind by its raw tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<TaskKind> {
        tag.parse().ok()
    }

    /// The raw tag as written in exports
    #[must_use]
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Human readable label of the task type
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            TaskKind::PowerShell => "Execute Powershell Command",
            TaskKind::Command => "Execute a Command",
            TaskKind::Download => "Download a resource",
            TaskKind::Shutdown => "Shutdown or Reboot",
            TaskKind::Registry => "Apply Registry Settings",
            TaskKind::FileOperations => "Perform File Operations",
            TaskKind::Security => "Security",
            TaskKind::LinuxCommand => "Execute a Command (UNIX/Linux)",
            TaskKind::LinuxDownload => "Download a resource (UNIX/Linux)",
        }
    }
}

/// Display name for any task tag, `"Unknown (<tag>)"` for unrecognized ones.
#[must_use]
pub fn task_display_name(tag: &str) -> String {
    match TaskKind::from_tag(tag) {
        Some(kind) => kind.display_name().to_string(),
        None => format!("Unknown ({tag})"),
    }
}

/// Resource kinds. This enumeration is closed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter, Serialize,
)]
pub enum ResourceKind {
    /// Content stored inside the automation database
    #[strum(serialize = "DATABASE")]
    Database,
    /// File located on a share
    #[strum(serialize = "FILESHARE")]
    Fileshare,
    /// File downloaded from a URL
    #[strum(serialize = "URLRESOURCE")]
    UrlResource,
    /// Resource package
    #[strum(serialize = "AMRESOURCEPACKAGE")]
    AutomationPackage,
}

impl ResourceKind {
    /// Parses a resource type tag.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCode`] for tags outside the closed set.
    pub fn from_code(code: &str) -> Result<ResourceKind> {
        code.parse()
            .map_err(|_| unknown(CodeSpace::ResourceType, code))
    }

    /// The raw tag as written in exports
    #[must_use]
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Human readable label of the resource kind
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ResourceKind::Database => "Stored in database",
            ResourceKind::Fileshare => "Located on Fileshare",
            ResourceKind::UrlResource => "Located at URL",
            ResourceKind::AutomationPackage => "RES ONE Automation Resource Package",
        }
    }

    /// The `properties` child that names a resource of this kind.
    ///
    /// Packages are named by `name`, every other kind by `file`.
    #[must_use]
    pub fn label_property(self) -> &'static str {
        match self {
            ResourceKind::AutomationPackage => "name",
            _ => "file",
        }
    }
}

/// Semantic name of a parameter type code, `"Unknown"` for unrecognized codes.
#[must_use]
pub fn parameter_type_name(code: &str) -> &'static str {
    match code.trim() {
        "0" => "Text",
        _ => "Unknown",
    }
}

/// The securable object a SECURITY task targets. This enumeration is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
pub enum SecurityObjectType {
    /// NTFS files and folders
    FileSystem,
    /// Registry keys
    Registry,
    /// File shares
    Share,
    /// Printers
    Printer,
}

impl SecurityObjectType {
    /// Parses a numeric object type code.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCode`] for codes other than 1 to 4.
    pub fn from_code(code: &str) -> Result<SecurityObjectType> {
        match code.trim() {
            "1" => Ok(SecurityObjectType::FileSystem),
            "2" => Ok(SecurityObjectType::Registry),
            "3" => Ok(SecurityObjectType::Share),
            "4" => Ok(SecurityObjectType::Printer),
            _ => Err(unknown(CodeSpace::SecurityObjectType, code)),
        }
    }

    /// Label used as the display name of the owning task
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SecurityObjectType::FileSystem => "Set NTFS File/Folder Permissions",
            SecurityObjectType::Registry => "Set Registry Permissions",
            SecurityObjectType::Share => "Set Share Permissions",
            SecurityObjectType::Printer => "Set Printer Permissions",
        }
    }
}

/// What a permission entry does. This enumeration is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum PermissionAction {
    /// Grant the right
    Allow,
    /// Deny the right
    Deny,
    /// Remove the account from the ACL
    Delete,
}

impl PermissionAction {
    /// Parses a numeric action code.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCode`] for codes other than 1 to 3.
    pub fn from_code(code: &str) -> Result<PermissionAction> {
        match code.trim() {
            "1" => Ok(PermissionAction::Allow),
            "2" => Ok(PermissionAction::Deny),
            "3" => Ok(PermissionAction::Delete),
            _ => Err(unknown(CodeSpace::PermissionAction, code)),
        }
    }
}

/// Label of an access mask value.
///
/// One table serves every object type: NTFS and share masks, registry masks and printer
/// masks occupy disjoint values. `-1` marks deletions and has an empty label.
///
/// # Errors
/// Returns [`Error::UnknownCode`] for values that are not in the table. Codes are
/// matched by their exact decimal spelling, so `+1048854` or `01048854` are unknown.
pub fn access_mask_label(code: &str) -> Result<&'static str> {
    let label = match code.trim() {
        "-1" => "",
        // NTFS / share
        "1048854" => "Write",
        "1179785" => "Read",
        "1179817" => "Read & Execute",
        "1180063" => "Read & Write",
        "1180095" => "Read, Write & Execute",
        "1245631" => "Modify",
        "2032127" => "Full Control",
        // Registry
        "268435456" => "Full Control",
        "-2147483648" => "Read",
        // Printer
        "131080" => "Print",
        "983052" => "Manage Printers",
        "983088" => "Manage Documents",
        "983096" => "Print & Manage Documents",
        "983100" => "Manage Printers & Documents",
        _ => return Err(unknown(CodeSpace::AccessMask, code)),
    };
    Ok(label)
}

/// Syntax highlighting hint derived from a script file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumIter, Serialize)]
pub enum SyntaxHint {
    /// Windows batch
    #[strum(serialize = "winbatch")]
    #[serde(rename = "winbatch")]
    Batch,
    /// POSIX shell
    #[strum(serialize = "bash")]
    #[serde(rename = "bash")]
    Shell,
    /// PowerShell scripts and modules
    #[strum(serialize = "powershell")]
    #[serde(rename = "powershell")]
    PowerShell,
    /// Perl
    #[strum(serialize = "perl")]
    #[serde(rename = "perl")]
    Perl,
    /// No highlighting
    #[strum(serialize = "none")]
    #[serde(rename = "none")]
    None,
}

impl SyntaxHint {
    /// Maps a script extension (with or without leading dot) to a hint
    #[must_use]
    pub fn from_extension(extension: &str) -> SyntaxHint {
        let extension = extension.trim().trim_start_matches('.');
        match extension.to_ascii_lowercase().as_str() {
            "cmd" => SyntaxHint::Batch,
            "sh" => SyntaxHint::Shell,
            "ps1" | "psm1" => SyntaxHint::PowerShell,
            "pl" => SyntaxHint::Perl,
            _ => SyntaxHint::None,
        }
    }

    /// The lexer name understood by common highlighters
    #[must_use]
    pub fn lexer(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn task_tags_round_trip() {
        for kind in TaskKind::iter() {
            assert_eq!(TaskKind::from_tag(kind.tag()), Some(kind));
            assert_eq!(task_display_name(kind.tag()), kind.display_name());
        }
        assert_eq!(task_display_name("FUTURETYPE"), "Unknown (FUTURETYPE)");
        assert_eq!(TaskKind::from_tag("command"), None);
    }

    #[test]
    fn resource_kinds_are_closed() {
        for kind in ResourceKind::iter() {
            assert_eq!(ResourceKind::from_code(kind.tag()).unwrap(), kind);
        }
        assert!(matches!(
            ResourceKind::from_code("FTP"),
            Err(Error::UnknownCode {
                space: CodeSpace::ResourceType,
                ref code
            }) if code == "FTP"
        ));
        assert_eq!(ResourceKind::AutomationPackage.label_property(), "name");
        assert_eq!(ResourceKind::Fileshare.label_property(), "file");
    }

    #[test]
    fn parameter_types_fall_back() {
        assert_eq!(parameter_type_name("0"), "Text");
        assert_eq!(parameter_type_name("42"), "Unknown");
    }

    #[test]
    fn security_codes() {
        assert_eq!(
            SecurityObjectType::from_code("2").unwrap(),
            SecurityObjectType::Registry
        );
        assert_eq!(
            SecurityObjectType::from_code("4").unwrap().label(),
            "Set Printer Permissions"
        );
        assert!(SecurityObjectType::from_code("5").is_err());

        assert_eq!(PermissionAction::from_code("3").unwrap(), PermissionAction::Delete);
        assert_eq!(PermissionAction::Deny.to_string(), "Deny");
        assert!(PermissionAction::from_code("0").is_err());
    }

    #[test]
    fn access_masks() {
        assert_eq!(access_mask_label("1048854").unwrap(), "Write");
        assert_eq!(access_mask_label("268435456").unwrap(), "Full Control");
        assert_eq!(access_mask_label("2032127").unwrap(), "Full Control");
        assert_eq!(access_mask_label("-2147483648").unwrap(), "Read");
        assert_eq!(access_mask_label("983100").unwrap(), "Manage Printers & Documents");
        assert_eq!(access_mask_label("-1").unwrap(), "");
        assert!(matches!(
            access_mask_label("7"),
            Err(Error::UnknownCode {
                space: CodeSpace::AccessMask,
                ..
            })
        ));
        assert!(access_mask_label("full").is_err());
        assert_eq!(access_mask_label(" 1048854 ").unwrap(), "Write");

        for spelling in ["01048854", "+268435456", "1048854.0", "-0001"] {
            assert!(access_mask_label(spelling).is_err(), "{spelling}");
        }
    }

    #[test]
    fn syntax_hints() {
        assert_eq!(SyntaxHint::from_extension("cmd"), SyntaxHint::Batch);
        assert_eq!(SyntaxHint::from_extension(".PS1"), SyntaxHint::PowerShell);
        assert_eq!(SyntaxHint::from_extension("psm1").lexer(), "powershell");
        assert_eq!(SyntaxHint::from_extension("pl").lexer(), "perl");
        assert_eq!(SyntaxHint::from_extension("sh").lexer(), "bash");
        assert_eq!(SyntaxHint::from_extension("vbs"), SyntaxHint::None);
        assert_eq!(SyntaxHint::from_extension("").lexer(), "none");
    }
}
