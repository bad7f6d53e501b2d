//! `FILEOPERATIONS` tasks.

use std::fmt;

use serde::Serialize;

use crate::{
    file::Element,
    metadata::{codes::TaskKind, context::DecodeContext, tasks::TaskSettings},
    Result,
};

use super::TaskDecoder;

/// The operation performed by one entry of a file operations task.
///
/// Operations without a dedicated variant, such as INI file edits, are kept verbatim in
/// [`FileOperationKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FileOperationKind {
    /// `copy`
    Copy,
    /// `move`
    Move,
    /// `rename`
    Rename,
    /// Any other operation, with its raw type
    Other(String),
}

impl FileOperationKind {
    /// Parses the raw operation type
    #[must_use]
    pub fn from_code(code: &str) -> FileOperationKind {
        match code.trim() {
            "copy" => FileOperationKind::Copy,
            "move" => FileOperationKind::Move,
            "rename" => FileOperationKind::Rename,
            other => FileOperationKind::Other(other.to_string()),
        }
    }

    /// Returns true if the operation has a destination location
    #[must_use]
    pub fn has_destination(&self) -> bool {
        !matches!(self, FileOperationKind::Other(_))
    }
}

impl fmt::Display for FileOperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOperationKind::Copy => f.write_str("copy"),
            FileOperationKind::Move => f.write_str("move"),
            FileOperationKind::Rename => f.write_str("rename"),
            FileOperationKind::Other(raw) => f.write_str(raw),
        }
    }
}

/// One entry of a file operations task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOperation {
    /// What the entry does
    pub kind: FileOperationKind,
    /// The file or folder operated on
    pub source: String,
    /// Target location, present exactly when [`FileOperationKind::has_destination`]
    pub destination: Option<String>,
}

impl FileOperation {
    fn from_element(element: &Element) -> Result<FileOperation> {
        let kind = FileOperationKind::from_code(&element.require_text("type")?);
        let destination = if kind.has_destination() {
            Some(element.require_text("destinationlocation")?)
        } else {
            None
        };

        Ok(FileOperation {
            source: element.require_text("sourcelocation")?,
            kind,
            destination,
        })
    }
}

pub(crate) struct FileOperationsDecoder;

impl TaskDecoder for FileOperationsDecoder {
    fn kind(&self) -> TaskKind {
        TaskKind::FileOperations
    }

    fn decode(&self, settings: &Element, _ctx: &DecodeContext<'_>) -> Result<TaskSettings> {
        let operations = settings
            .select("fileoperationtask")
            .into_iter()
            .map(FileOperation::from_element)
            .collect::<Result<Vec<_>>>()?;
        Ok(TaskSettings::FileOperations(operations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metadata::tasks::decode_task, test::task_xml, Document, Error};

    fn decode(settings: &str) -> Result<Vec<FileOperation>> {
        let doc = Document::parse(&task_xml("{f}", "FILEOPERATIONS", settings, false)).unwrap();
        let ctx = DecodeContext::new(None, None).unwrap();
        match decode_task(doc.root(), &ctx)?.settings {
            Some(TaskSettings::FileOperations(operations)) => Ok(operations),
            other => panic!("unexpected settings {other:?}"),
        }
    }

    #[test]
    fn destination_only_for_copy_move_rename() {
        let operations = decode(
            "<fileoperationtasks>\
               <fileoperationtask><type>copy</type><sourcelocation>C:\\a.txt</sourcelocation>\
                 <destinationlocation>D:\\a.txt</destinationlocation></fileoperationtask>\
               <fileoperationtask><type>delete</type><sourcelocation>C:\\b.txt</sourcelocation>\
                 <destinationlocation>ignored</destinationlocation></fileoperationtask>\
               <fileoperationtask><type>rename</type><sourcelocation>C:\\c.txt</sourcelocation>\
                 <destinationlocation>d.txt</destinationlocation></fileoperationtask>\
             </fileoperationtasks>",
        )
        .unwrap();

        assert_eq!(operations.len(), 3);
        assert_eq!(operations[0].kind, FileOperationKind::Copy);
        assert_eq!(operations[0].destination.as_deref(), Some("D:\\a.txt"));
        assert_eq!(operations[1].kind, FileOperationKind::Other("delete".into()));
        assert_eq!(operations[1].destination, None);
        assert_eq!(operations[2].kind.to_string(), "rename");
        assert_eq!(operations[2].source, "C:\\c.txt");
    }

    #[test]
    fn ini_edits_pass_through() {
        let operations = decode(
            "<fileoperationtask><type>inifile</type><sourcelocation>C:\\app.ini</sourcelocation>\
             <section>main</section></fileoperationtask>",
        )
        .unwrap();
        assert_eq!(operations[0].kind, FileOperationKind::Other("inifile".into()));
        assert!(operations[0].destination.is_none());
    }

    #[test]
    fn move_without_destination() {
        let err = decode(
            "<fileoperationtask><type>move</type><sourcelocation>C:\\a</sourcelocation></fileoperationtask>",
        )
        .unwrap_err();
        assert!(matches!(err.root_cause(), Error::MalformedDocument { .. }));
    }

    #[test]
    fn empty_task() {
        assert!(decode("").unwrap().is_empty());
    }
}
