// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # bbscope
//!
//! Extraction engine for exported automation building blocks.
//!
//! A building block is an XML bundle of **resources** (files and packages), **modules**
//! (ordered lists of tasks) and **projects** (ordered lists of module references).
//! `bbscope` reads such an export and produces a typed, cross-referenced
//! [`DocumentModel`]: every task is decoded into a variant of its own, embedded registry
//! patches are decompressed, numeric security codes are translated and GUID references
//! are resolved. Rendering the model is left to the consumer; every record derives
//! `serde::Serialize`.
//!
//! ## Features
//!
//! - **Typed tasks** - One settings type per task kind, unknown kinds are kept instead of failing
//! - **Strict cross-references** - Dangling and ambiguous GUIDs are reported, never guessed
//! - **Payload codec** - Decoding and encoding of the compressed hex blobs used by exports
//! - **Error policies** - Abort on the first broken entity or skip and record it
//! - **Parallel builds** - Collections can be decoded on the rayon pool with identical results
//!
//! ## Quick Start
//!
//! ```rust
//! use bbscope::prelude::*;
//!
//! let xml = r#"<?xml version="1.0" encoding="utf-8"?>
//! <buildingblock>
//!   <resources>
//!     <resource><properties>
//!       <guid>{R1}</guid><type>FILESHARE</type><file>setup.exe</file>
//!       <enabled>yes</enabled><path>\\srv\share\setup.exe</path>
//!     </properties></resource>
//!   </resources>
//!   <modules>
//!     <module>
//!       <properties><name>Install</name><guid>{M1}</guid><enabled>yes</enabled></properties>
//!       <tasks>
//!         <task>
//!           <properties><type>DOWNLOAD</type><guid>{T1}</guid><enabled>yes</enabled></properties>
//!           <settings>
//!             <ysnlog>yes</ysnlog><ysndestination>no</ysndestination>
//!             <resources>{R1}</resources>
//!           </settings>
//!         </task>
//!       </tasks>
//!     </module>
//!   </modules>
//! </buildingblock>"#;
//!
//! let doc = Document::parse(xml)?;
//! let model = build_model(doc.root())?;
//!
//! let install = model.module("{M1}").unwrap();
//! if let Some(TaskSettings::Download(download)) = &install.tasks[0].settings {
//!     assert_eq!(download.resources[0].name, "setup.exe");
//! }
//! # Ok::<(), bbscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`file`] - Parsing the XML text into an owned element tree
//! - [`metadata`] - Code tables, payload codec, resolver, extractors and the model builder
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! The crate reports through [`tracing`](https://docs.rs/tracing): unknown task types and
//! skipped entities at `warn`, one summary per build at `info`, every decoded entity at
//! `debug`. Installing a subscriber is up to the application.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use bbscope::prelude::*;
///
/// let doc = Document::parse("<buildingblock/>")?;
/// let model = build_model_with(doc.root(), &BuildConfig::lenient())?;
/// assert!(model.modules().is_empty());
/// # Ok::<(), bbscope::Error>(())
/// ```
pub mod prelude;

/// Reading exports into an element tree
///
/// # Key Types
///
/// - [`Document`] - A parsed export
/// - [`Element`] - One node of the tree with ElementTree-style path lookup
pub mod file;

/// Decoding the element tree into the document model
///
/// See the [`metadata::model`] module for the build steps and [`metadata::tasks`] for
/// the supported task types.
pub mod metadata;

/// `bbscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bbscope` Error type
///
/// # Examples
///
/// ```rust
/// use bbscope::{build_model, Document, Error};
///
/// let doc = Document::parse("<buildingblock><modules><module/></modules></buildingblock>")?;
/// match build_model(doc.root()) {
///     Err(e @ Error::Entity { .. }) => println!("broken entity: {e}"),
///     Err(Error::MalformedDocument { message, .. }) => println!("malformed: {message}"),
///     Err(e) => println!("error: {e}"),
///     Ok(model) => println!("{} modules", model.modules().len()),
/// }
/// # Ok::<(), bbscope::Error>(())
/// ```
pub use error::{EntityKind, Error};

/// Parsed exports and their element tree
pub use file::{Document, Element};

/// Building the document model
///
/// # Example
///
/// ```rust
/// use bbscope::{build_model_with, BuildConfig, Document, ErrorPolicy};
///
/// let doc = Document::parse("<buildingblock><projects/></buildingblock>")?;
/// let config = BuildConfig::default()
///     .with_error_policy(ErrorPolicy::Skip)
///     .with_parallel(true);
/// let model = build_model_with(doc.root(), &config)?;
/// assert!(model.is_complete());
/// # Ok::<(), bbscope::Error>(())
/// ```
pub use metadata::{
    config::{BuildConfig, ErrorPolicy},
    model::{build_model, build_model_with, DocumentModel, EntityFailure, SummaryEntry},
};
