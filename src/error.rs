use thiserror::Error;

use crate::metadata::{codes::CodeSpace, resolver::Collection};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::MalformedDocument {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedDocument {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The kind of entity an [`Error::Entity`] context frame belongs to.
///
/// Tasks carry their raw type tag, so a failure deep inside a decoder still
/// names both the offending GUID and the task type it was decoded as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// A resource in the `resources` collection
    Resource,
    /// A module in the `modules` collection
    Module,
    /// A project in the `projects` collection
    Project,
    /// A task inside a module, with its raw type tag
    Task(String),
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Resource => write!(f, "resource"),
            EntityKind::Module => write!(f, "module"),
            EntityKind::Project => write!(f, "project"),
            EntityKind::Task(tag) => write!(f, "{tag} task"),
        }
    }
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Structural Errors
/// - [`Error::MalformedDocument`] - Required nodes are missing or have an unexpected shape
/// - [`Error::Xml`] - The input text is not well-formed XML
///
/// ## Lookup Errors
/// - [`Error::UnknownCode`] - A closed code space (resource type, security codes) did not
///   contain the value found in the document
///
/// ## Payload Errors
/// - [`Error::MalformedPayload`] - Embedded blob is not valid hex or not a valid compressed stream
/// - [`Error::EncodingError`] - Decompressed payload is not valid UTF-8
/// - [`Error::Io`] - The encoder failed while compressing a payload
///
/// ## Cross-Reference Errors
/// - [`Error::ReferenceNotFound`] - A GUID reference matched nothing
/// - [`Error::AmbiguousReference`] - A GUID reference matched more than one element
///
/// # Examples
///
/// ```rust
/// use bbscope::{build_model, Document, Error};
///
/// let doc = Document::parse("<export/>")?;
/// match build_model(doc.root()) {
///     Err(Error::MalformedDocument { message, .. }) => println!("bad input: {message}"),
///     Err(e) => println!("other error: {e}"),
///     Ok(_) => unreachable!(),
/// }
/// # Ok::<(), bbscope::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The document is missing required structural nodes.
    ///
    /// The error includes the source location where the problem was detected
    /// for debugging purposes.
    #[error("Malformed document - {file}:{line}: {message}")]
    MalformedDocument {
        /// The message to be printed for the MalformedDocument error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A value from a closed enumeration was not recognized.
    #[error("Unknown {space} code '{code}'")]
    UnknownCode {
        /// The code space that was queried
        space: CodeSpace,
        /// The raw code as found in the document
        code: String,
    },

    /// An embedded payload could not be hex-decoded or decompressed.
    #[error("Malformed payload - {0}")]
    MalformedPayload(String),

    /// An embedded payload decompressed to bytes that are not valid UTF-8.
    #[error("Payload is not valid UTF-8 - {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    /// No element of the collection carries the requested GUID.
    #[error("No entry in {collection} with GUID {guid}")]
    ReferenceNotFound {
        /// The collection that was searched
        collection: Collection,
        /// The GUID that was looked up
        guid: String,
    },

    /// More than one element of the collection carries the requested GUID.
    #[error("{count} entries in {collection} share GUID {guid}")]
    AmbiguousReference {
        /// The collection that was searched
        collection: Collection,
        /// The GUID that was looked up
        guid: String,
        /// How many elements matched
        count: usize,
    },

    /// An I/O failure while compressing a payload.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The input is not well-formed XML.
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    /// A failure attributed to a specific entity of the document.
    ///
    /// Extractors wrap the underlying error with the entity kind and GUID so that
    /// diagnostics always name the offending record. Use [`Error::root_cause`] to get
    /// to the wrapped error.
    #[error("{kind} {guid}: {source}")]
    Entity {
        /// The kind of entity that failed
        kind: EntityKind,
        /// The GUID of the entity that failed
        guid: String,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps `self` into an [`Error::Entity`] frame.
    #[must_use]
    pub fn in_entity(self, kind: EntityKind, guid: &str) -> Self {
        Error::Entity {
            kind,
            guid: guid.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping all [`Error::Entity`] context frames.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::Entity { source, .. } = current {
            current = source;
        }
        current
    }

    /// Returns the GUID of the outermost entity frame, if any.
    #[must_use]
    pub fn entity_guid(&self) -> Option<&str> {
        match self {
            Error::Entity { guid, .. } => Some(guid),
            _ => None,
        }
    }
}
