//! Shared, read-only state threaded through the extractors and task decoders.

use crate::{
    file::Element,
    metadata::resolver::{Collection, GuidIndex},
    Result,
};

/// The cross-reference indices of one document.
///
/// Created once before any entity is decoded and only read afterwards, which makes it
/// safe to share between rayon workers.
pub struct DecodeContext<'a> {
    resources: GuidIndex<'a>,
    modules: GuidIndex<'a>,
}

impl<'a> DecodeContext<'a> {
    /// Builds the indices for the given collection roots. Absent collections index nothing.
    ///
    /// # Errors
    /// Fails like [`GuidIndex::build`].
    pub fn new(resources: Option<&'a Element>, modules: Option<&'a Element>) -> Result<Self> {
        Ok(DecodeContext {
            resources: Self::index(Collection::Resources, resources)?,
            modules: Self::index(Collection::Modules, modules)?,
        })
    }

    fn index(collection: Collection, root: Option<&'a Element>) -> Result<GuidIndex<'a>> {
        match root {
            Some(root) => GuidIndex::build(collection, root),
            None => Ok(GuidIndex::empty(collection)),
        }
    }

    /// Index over `buildingblock/resources`
    #[must_use]
    pub fn resources(&self) -> &GuidIndex<'a> {
        &self.resources
    }

    /// Index over `buildingblock/modules`
    #[must_use]
    pub fn modules(&self) -> &GuidIndex<'a> {
        &self.modules
    }
}
