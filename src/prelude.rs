//! # bbscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! bbscope library. Import it to get quick access to everything needed for reading an
//! export and walking its model.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bbscope operations
pub use crate::Error;

/// The result type used throughout bbscope
pub use crate::Result;

/// Context frames attached to entity failures
pub use crate::EntityKind;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Parsed exports
pub use crate::{Document, Element};

/// Model builder and its configuration
pub use crate::{build_model, build_model_with, BuildConfig, DocumentModel, ErrorPolicy};

// ================================================================================================
// Records
// ================================================================================================

/// Resource, module and project records
pub use crate::metadata::entities::{
    FolderPath, Module, Parameter, Project, ProjectModuleRef, Resource, ResourceDetails,
    ResourceRef,
};

/// Tasks and their type specific settings
pub use crate::metadata::tasks::{
    AccessRight, CommandSettings, DownloadSettings, FileOperation, FileOperationKind,
    PowerShellSource, RegistrySettings, SecurityPermission, SecuritySettings, ShutdownSettings,
    Task, TaskSettings,
};

// ================================================================================================
// Code Tables
// ================================================================================================

/// Closed and open code spaces
pub use crate::metadata::codes::{
    PermissionAction, ResourceKind, SecurityObjectType, SyntaxHint, TaskKind,
};

/// Payload codec
pub use crate::metadata::payload::{decode_payload, encode_payload};
