//! `DOWNLOAD` and `LINUX_DOWNLOAD` tasks.
//!
//! The resources to download are listed as a comma separated GUID string. Each GUID is
//! resolved against the resources collection, keeping the order of the list.

use serde::Serialize;

use crate::{
    file::Element,
    metadata::{
        codes::TaskKind, context::DecodeContext, entities::ResourceRef, tasks::TaskSettings,
    },
    Result,
};

use super::TaskDecoder;

/// Settings of a download task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadSettings {
    /// Write the download to the job log
    pub log: bool,
    /// Target folder, present when the task overrides the default destination
    pub destination: Option<String>,
    /// Downloaded resources in the order of the task's list
    pub resources: Vec<ResourceRef>,
}

pub(crate) struct DownloadDecoder {
    pub(crate) kind: TaskKind,
}

impl TaskDecoder for DownloadDecoder {
    fn kind(&self) -> TaskKind {
        self.kind
    }

    fn decode(&self, settings: &Element, ctx: &DecodeContext<'_>) -> Result<TaskSettings> {
        let destination = if settings.flag("ysndestination")? {
            Some(settings.require_text("destination")?)
        } else {
            None
        };

        let resources = settings
            .require_text("resources")?
            .split(',')
            .map(str::trim)
            .filter(|guid| !guid.is_empty())
            .map(|guid| ResourceRef::from_element(ctx.resources().resolve(guid)?))
            .collect::<Result<Vec<_>>>()?;

        let download = DownloadSettings {
            log: settings.flag("ysnlog")?,
            destination,
            resources,
        };

        Ok(match self.kind {
            TaskKind::LinuxDownload => TaskSettings::LinuxDownload(download),
            _ => TaskSettings::Download(download),
        })
    }
}
