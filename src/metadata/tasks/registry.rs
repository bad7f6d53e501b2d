//! `REGISTRY` tasks.

use serde::Serialize;

use crate::{
    file::Element,
    metadata::{
        codes::TaskKind, context::DecodeContext, payload::decode_payload, tasks::TaskSettings,
    },
    Result,
};

use super::TaskDecoder;

/// Settings of a registry task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySettings {
    /// The decoded `.reg` patch
    pub content: String,
}

pub(crate) struct RegistryDecoder;

impl TaskDecoder for RegistryDecoder {
    fn kind(&self) -> TaskKind {
        TaskKind::Registry
    }

    fn decode(&self, settings: &Element, _ctx: &DecodeContext<'_>) -> Result<TaskSettings> {
        let content = decode_payload(&settings.require_text("regfile")?)?;
        Ok(TaskSettings::Registry(RegistrySettings { content }))
    }
}
