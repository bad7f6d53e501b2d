//! In-memory building block documents.
//!
//! This module provides the navigable tree the model builder works on. A [`Document`]
//! owns the root [`Element`] of an exported building block; it is produced from text or
//! raw bytes that the caller already holds in memory. Reading files from disk is left to
//! the caller.
//!
//! # Key Components
//!
//! - [`crate::file::Document`] - Owner of a parsed export
//! - [`crate::file::Element`] - Owned element with attributes, text and children, plus
//!   ElementTree-style path selection
//!
//! # Examples
//!
//! ```rust
//! use bbscope::Document;
//!
//! let doc = Document::parse("<buildingblock><modules/></buildingblock>")?;
//! assert_eq!(doc.root().name(), "buildingblock");
//! assert!(doc.root().child("modules").is_some());
//! # Ok::<(), bbscope::Error>(())
//! ```
mod element;
mod reader;

pub use element::Element;

use std::str::FromStr;

use crate::Result;

/// A parsed building block export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parses a document from XML text.
    ///
    /// # Arguments
    ///
    /// * `input` - The complete export as text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input is empty or contains no root element
    /// - The XML is not well-formed
    pub fn parse(input: &str) -> Result<Document> {
        if input.trim().is_empty() {
            return Err(malformed_error!("Provided input was empty"));
        }

        let root = reader::read_tree(input)?;
        Ok(Document { root })
    }

    /// Parses a document from a memory buffer holding UTF-8 encoded XML.
    ///
    /// A leading UTF-8 byte order mark is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not UTF-8 or fails to parse, see [`Document::parse`].
    pub fn from_mem(data: &[u8]) -> Result<Document> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let text = std::str::from_utf8(data)
            .map_err(|e| malformed_error!("Document is not valid UTF-8: {}", e))?;

        Self::parse(text)
    }

    /// Wraps an already constructed tree.
    #[must_use]
    pub fn from_root(root: Element) -> Document {
        Document { root }
    }

    /// The root element of the export
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Consumes the document and returns its root element
    #[must_use]
    pub fn into_root(self) -> Element {
        self.root
    }
}

impl FromStr for Document {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Document::parse(s)
    }
}
