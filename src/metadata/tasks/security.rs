//! `SECURITY` tasks.
//!
//! A security task sets permissions on one securable object. The numeric access masks
//! share one lookup table across all object types, so every decoded right carries the
//! object type it was read for.

use serde::Serialize;

use crate::{
    file::Element,
    metadata::{
        codes::{access_mask_label, PermissionAction, SecurityObjectType, TaskKind},
        context::DecodeContext,
        tasks::TaskSettings,
    },
    Result,
};

use super::TaskDecoder;

/// An access mask together with the object type it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRight {
    /// Object type the mask was read for
    pub context: SecurityObjectType,
    /// The raw mask value
    pub mask: String,
    /// Human readable label, empty for deletions
    pub label: &'static str,
}

impl AccessRight {
    /// Decodes `mask` in the given object type context.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownCode`] if the mask is not a known value.
    pub fn decode(context: SecurityObjectType, mask: &str) -> Result<AccessRight> {
        Ok(AccessRight {
            context,
            label: access_mask_label(mask)?,
            mask: mask.trim().to_string(),
        })
    }
}

/// One access control entry of a security task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityPermission {
    /// Allow, deny or remove
    pub action: PermissionAction,
    /// User or group the entry applies to
    pub account: String,
    /// The granted or denied right
    pub right: AccessRight,
}

/// Settings of a security task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecuritySettings {
    /// Kind of object the permissions are set on
    pub object_type: SecurityObjectType,
    /// Path or name of the object
    pub target: String,
    /// Replace the existing ACL instead of merging into it
    pub replace_acl: bool,
    /// Propagate to child objects
    pub propagate: bool,
    /// Access control entries in document order
    pub permissions: Vec<SecurityPermission>,
}

pub(crate) struct SecurityDecoder;

impl TaskDecoder for SecurityDecoder {
    fn kind(&self) -> TaskKind {
        TaskKind::Security
    }

    fn decode(&self, settings: &Element, _ctx: &DecodeContext<'_>) -> Result<TaskSettings> {
        let object_type = SecurityObjectType::from_code(&settings.require_text("objecttype")?)?;

        let permissions = settings
            .select("permissions/permission")
            .into_iter()
            .map(|entry| {
                Ok(SecurityPermission {
                    action: PermissionAction::from_code(&entry.require_text("action")?)?,
                    account: entry.require_text("account")?,
                    right: AccessRight::decode(object_type, &entry.require_text("permission")?)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TaskSettings::Security(SecuritySettings {
            object_type,
            target: settings.require_text("filename")?,
            replace_acl: settings.flag("replaceacl")?,
            propagate: settings.flag("propagate")?,
            permissions,
        }))
    }
}
