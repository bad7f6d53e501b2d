//! Extraction of the building block document model.
//!
//! This module turns the element tree of an export into typed records. It holds the
//! closed and open code tables, the payload codec, the GUID resolver and the per type
//! task decoders, and ties them together in the model builder.
//!
//! # Key Components
//!
//! - [`model`] - [`crate::DocumentModel`] and the builder functions
//! - [`entities`] - Resource, module, project and parameter records
//! - [`tasks`] - Task records and the dispatch table of type specific decoders
//! - [`resolver`] - GUID indices over the resources and modules collections
//! - [`codes`] - Lookup tables for the numeric and string codes found in exports
//! - [`payload`] - Codec for compressed blobs embedded in task settings
//! - [`config`] - Error policy and parallelism of a build
//!
//! # Examples
//!
//! ```rust
//! use bbscope::{build_model, metadata::tasks::TaskSettings, Document};
//!
//! let doc = Document::parse(
//!     "<buildingblock><modules><module>\
//!        <properties><name>Patch</name><guid>{M}</guid><enabled>yes</enabled></properties>\
//!        <tasks><task>\
//!          <properties><type>REGISTRY</type><guid>{T}</guid><enabled>yes</enabled></properties>\
//!          <settings><regfile>RESZLIB000000000000000789C0BCFCC4BC92F2F56084A4DCF2C2E29AA54704DC92CC92F52084B2D2ACECCCF5330D533300000FC6F0CD5</regfile></settings>\
//!        </task></tasks>\
//!      </module></modules></buildingblock>",
//! )?;
//!
//! let model = build_model(doc.root())?;
//! let task = &model.module("{M}").unwrap().tasks[0];
//! assert_eq!(task.display_name, "Apply Registry Settings");
//! match &task.settings {
//!     Some(TaskSettings::Registry(registry)) => {
//!         assert_eq!(registry.content, "Windows Registry Editor Version 5.00")
//!     }
//!     other => panic!("unexpected settings {other:?}"),
//! }
//! # Ok::<(), bbscope::Error>(())
//! ```

/// Numeric and string code tables
pub mod codes;
/// Configuration of a model build
pub mod config;
/// Shared state threaded through the decoders
pub mod context;
/// Resource, module and project records
pub mod entities;
/// The document model and its builder
pub mod model;
/// Codec for embedded compressed payloads
pub mod payload;
/// GUID based cross-reference resolution
pub mod resolver;
/// Task records and type specific decoders
pub mod tasks;
