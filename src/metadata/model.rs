//! The document model and its builder.
//!
//! [`build_model_with`] turns the root element of an export into a [`DocumentModel`]:
//!
//! 1. validate the `buildingblock` root and its collections
//! 2. index resources and modules by GUID
//! 3. extract resources, then modules (decoding their visible tasks), then projects
//!    (resolving their module references)
//! 4. reject duplicate GUIDs inside one collection
//! 5. build the name sorted summaries
//!
//! The indices are complete before the first entity is decoded and are only read
//! afterwards. This lets the builder decode the items of a collection on the rayon pool
//! without taking any locks; results are collected in document order so a parallel build
//! yields the same model and the same first error as a sequential one.
//!
//! # Examples
//!
//! ```rust
//! use bbscope::{build_model_with, BuildConfig, Document};
//!
//! let doc = Document::parse(
//!     "<buildingblock><modules><module><properties>\
//!        <name>Deploy</name><guid>{M1}</guid><enabled>yes</enabled>\
//!      </properties></module></modules></buildingblock>",
//! )?;
//! let model = build_model_with(doc.root(), &BuildConfig::lenient())?;
//!
//! assert_eq!(model.module("{M1}").map(|m| m.title.as_str()), Some("Deploy"));
//! assert!(model.is_complete());
//! # Ok::<(), bbscope::Error>(())
//! ```

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    file::Element,
    metadata::{
        config::{BuildConfig, ErrorPolicy},
        context::DecodeContext,
        entities::{
            extract_module, extract_project, extract_resource, Module, Project, Resource,
        },
        resolver::{Collection, GuidIndex},
    },
    Error, Result,
};

/// Name of the root element of every export
pub const ROOT_NAME: &str = "buildingblock";

/// One line of a collection summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    /// Display name of the entity
    pub name: String,
    /// GUID of the entity
    pub guid: String,
}

/// An entity that was left out of the model under [`ErrorPolicy::Skip`].
#[derive(Debug)]
pub struct EntityFailure {
    /// Collection the entity belongs to
    pub collection: Collection,
    /// GUID of the entity, if it could be read
    pub guid: Option<String>,
    /// Why the entity could not be decoded
    pub error: Error,
}

/// Common view of the three record types, used for indexing and summaries.
trait Entity {
    fn guid(&self) -> &str;
    fn display_name(&self) -> &str;
}

impl Entity for Resource {
    fn guid(&self) -> &str {
        &self.guid
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Entity for Module {
    fn guid(&self) -> &str {
        &self.guid
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

impl Entity for Project {
    fn guid(&self) -> &str {
        &self.guid
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

/// The decoded building block.
///
/// Records are kept in document order. Lookups by GUID and the name sorted summaries are
/// computed once while building.
#[derive(Debug, Serialize)]
pub struct DocumentModel {
    resources: Vec<Resource>,
    modules: Vec<Module>,
    projects: Vec<Project>,
    #[serde(skip)]
    resource_index: HashMap<String, usize>,
    #[serde(skip)]
    module_index: HashMap<String, usize>,
    #[serde(skip)]
    project_index: HashMap<String, usize>,
    resource_summary: Vec<SummaryEntry>,
    module_summary: Vec<SummaryEntry>,
    project_summary: Vec<SummaryEntry>,
    #[serde(skip)]
    failures: Vec<EntityFailure>,
}

impl DocumentModel {
    /// All resources in document order
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// All modules in document order
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// All projects in document order
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a resource by GUID
    #[must_use]
    pub fn resource(&self, guid: &str) -> Option<&Resource> {
        self.resource_index
            .get(guid.trim())
            .map(|&index| &self.resources[index])
    }

    /// Looks up a module by GUID
    #[must_use]
    pub fn module(&self, guid: &str) -> Option<&Module> {
        self.module_index
            .get(guid.trim())
            .map(|&index| &self.modules[index])
    }

    /// Looks up a project by GUID
    #[must_use]
    pub fn project(&self, guid: &str) -> Option<&Project> {
        self.project_index
            .get(guid.trim())
            .map(|&index| &self.projects[index])
    }

    /// Resources sorted by label, ties broken by GUID
    #[must_use]
    pub fn resource_summary(&self) -> &[SummaryEntry] {
        &self.resource_summary
    }

    /// Modules sorted by name, ties broken by GUID
    #[must_use]
    pub fn module_summary(&self) -> &[SummaryEntry] {
        &self.module_summary
    }

    /// Projects sorted by name, ties broken by GUID
    #[must_use]
    pub fn project_summary(&self) -> &[SummaryEntry] {
        &self.project_summary
    }

    /// Entities left out of the model, in document order per collection.
    /// Always empty under [`ErrorPolicy::Abort`].
    #[must_use]
    pub fn failures(&self) -> &[EntityFailure] {
        &self.failures
    }

    /// Returns true if every entity of the document made it into the model
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds the model of an export with the default configuration.
///
/// # Errors
/// See [`build_model_with`].
pub fn build_model(root: &Element) -> Result<DocumentModel> {
    build_model_with(root, &BuildConfig::default())
}

/// Builds the model of an export.
///
/// # Arguments
///
/// * `root` - The root element of the export, see [`crate::Document::root`]
/// * `config` - Error policy and parallelism
///
/// # Errors
///
/// Structural problems of the document itself are always returned:
/// - [`Error::MalformedDocument`] if the root is not `buildingblock`, or a collection holds
///   elements other than its items
///
/// Under [`ErrorPolicy::Abort`] the first entity failure in document order is returned,
/// wrapped in an [`Error::Entity`] frame. Duplicate GUIDs inside one collection are
/// reported as [`Error::AmbiguousReference`].
pub fn build_model_with(root: &Element, config: &BuildConfig) -> Result<DocumentModel> {
    if root.name() != ROOT_NAME {
        return Err(malformed_error!(
            "Root element is <{}>, expected <{}>",
            root.name(),
            ROOT_NAME
        ));
    }

    let resource_root = collection_root(root, Collection::Resources);
    let module_root = collection_root(root, Collection::Modules);
    let project_root = collection_root(root, Collection::Projects);

    let ctx = DecodeContext::new(resource_root, module_root)?;
    if let Some(projects) = project_root {
        // Only validates the collection shape, nothing references projects
        GuidIndex::build(Collection::Projects, projects)?;
    }

    let mut failures = Vec::new();

    let resources = extract_all(
        Collection::Resources,
        resource_root,
        config,
        &mut failures,
        extract_resource,
    )?;
    let modules = extract_all(
        Collection::Modules,
        module_root,
        config,
        &mut failures,
        |module| extract_module(module, &ctx),
    )?;
    let projects = extract_all(
        Collection::Projects,
        project_root,
        config,
        &mut failures,
        |project| extract_project(project, &ctx),
    )?;

    let (resources, resource_index) =
        index_records(Collection::Resources, resources, config, &mut failures)?;
    let (modules, module_index) =
        index_records(Collection::Modules, modules, config, &mut failures)?;
    let (projects, project_index) =
        index_records(Collection::Projects, projects, config, &mut failures)?;

    tracing::info!(
        resources = resources.len(),
        modules = modules.len(),
        projects = projects.len(),
        failures = failures.len(),
        "building block model built"
    );

    Ok(DocumentModel {
        resource_summary: summarize(&resources),
        module_summary: summarize(&modules),
        project_summary: summarize(&projects),
        resources,
        modules,
        projects,
        resource_index,
        module_index,
        project_index,
        failures,
    })
}

fn collection_root(root: &Element, collection: Collection) -> Option<&Element> {
    root.child(collection.root_name())
}

/// Extracts every item of a collection, honoring the error policy.
fn extract_all<T, F>(
    collection: Collection,
    root: Option<&Element>,
    config: &BuildConfig,
    failures: &mut Vec<EntityFailure>,
    extract: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Element) -> Result<T> + Sync,
{
    let Some(root) = root else {
        return Ok(Vec::new());
    };
    let items: Vec<&Element> = root.children().collect();

    let results: Vec<Result<T>> = if config.parallel {
        items.par_iter().map(|item| extract(item)).collect()
    } else {
        let mut results = Vec::with_capacity(items.len());
        for item in &items {
            let result = extract(item);
            let failed = result.is_err();
            results.push(result);
            if failed && config.error_policy == ErrorPolicy::Abort {
                break;
            }
        }
        results
    };

    let mut records = Vec::with_capacity(results.len());
    for (item, result) in items.iter().zip(results) {
        match result {
            Ok(record) => {
                tracing::debug!(%collection, guid = item.child_text("properties/guid"), "decoded");
                records.push(record);
            }
            Err(error) => match config.error_policy {
                ErrorPolicy::Abort => return Err(error),
                ErrorPolicy::Skip => {
                    let guid = item
                        .child_text("properties/guid")
                        .map(|guid| guid.trim().to_string());
                    tracing::warn!(%collection, ?guid, %error, "skipping entity");
                    failures.push(EntityFailure {
                        collection,
                        guid,
                        error,
                    });
                }
            },
        }
    }
    Ok(records)
}

/// Builds the GUID lookup of a collection; later records reusing a GUID are duplicates.
fn index_records<T: Entity>(
    collection: Collection,
    records: Vec<T>,
    config: &BuildConfig,
    failures: &mut Vec<EntityFailure>,
) -> Result<(Vec<T>, HashMap<String, usize>)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in &records {
        *counts.entry(record.guid().to_string()).or_default() += 1;
    }

    let mut kept = Vec::with_capacity(records.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    for record in records {
        let count = counts.get(record.guid()).copied().unwrap_or_default();
        if index.contains_key(record.guid()) {
            // Already reported together with the first occurrence
            continue;
        }

        if count > 1 {
            let error = Error::AmbiguousReference {
                collection,
                guid: record.guid().to_string(),
                count,
            };
            match config.error_policy {
                ErrorPolicy::Abort => return Err(error),
                ErrorPolicy::Skip => {
                    tracing::warn!(%collection, guid = record.guid(), count, "duplicate GUID");
                    failures.push(EntityFailure {
                        collection,
                        guid: Some(record.guid().to_string()),
                        error,
                    });
                }
            }
        }

        index.insert(record.guid().to_string(), kept.len());
        kept.push(record);
    }
    Ok((kept, index))
}

fn summarize<T: Entity>(records: &[T]) -> Vec<SummaryEntry> {
    let mut summary: Vec<SummaryEntry> = records
        .iter()
        .map(|record| SummaryEntry {
            name: record.display_name().to_string(),
            guid: record.guid().to_string(),
        })
        .collect();
    // Stable, equal names keep document order
    summary.sort_by(|a, b| a.name.cmp(&b.name));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::tasks::TaskSettings,
        test::{building_block_xml, module_xml, project_xml, resource_xml, task_xml},
        Document,
    };

    const SHUTDOWN: &str = "<message>no</message><reboot>yes</reboot><force>no</force>\
                            <check4users>no</check4users><timeout>0</timeout>\
                            <waitforreboot>no</waitforreboot>";

    fn sample() -> Document {
        Document::parse(&building_block_xml(
            &[
                resource_xml("{R2}", "FILESHARE", "zeta.txt"),
                resource_xml("{R1}", "AMRESOURCEPACKAGE", "Alpha Pack"),
            ],
            &[
                module_xml(
                    "{M1}",
                    "Reboot",
                    &[
                        task_xml("{T1}", "SHUTDOWN", SHUTDOWN, false),
                        task_xml("{T2}", "FUTURETYPE", "<x/>", false),
                    ],
                ),
                module_xml(
                    "{M2}",
                    "Fetch",
                    &[task_xml(
                        "{T3}",
                        "DOWNLOAD",
                        "<ysnlog>no</ysnlog><ysndestination>no</ysndestination>\
                         <resources>{R1},{R2}</resources>",
                        false,
                    )],
                ),
            ],
            &[project_xml("{P1}", "Rollout", &[("{M2}", true), ("{M1}", false)])],
        ))
        .unwrap()
    }

    fn broken() -> Document {
        Document::parse(&building_block_xml(
            &[
                resource_xml("{R1}", "FILESHARE", "a.txt"),
                resource_xml("{R2}", "GOPHER", "b.txt"),
                resource_xml("{R3}", "FTP", "c.txt"),
            ],
            &[module_xml("{M1}", "Ok", &[])],
            &[],
        ))
        .unwrap()
    }

    #[test]
    fn builds_all_collections() {
        let doc = sample();
        let model = build_model(doc.root()).unwrap();

        assert_eq!(model.resources().len(), 2);
        assert_eq!(model.modules().len(), 2);
        assert_eq!(model.projects().len(), 1);
        assert!(model.is_complete());

        let reboot = model.module("{M1}").unwrap();
        assert_eq!(reboot.tasks.len(), 2);
        assert!(reboot.tasks[1].is_unknown());
        assert_eq!(reboot.tasks[1].display_name, "Unknown (FUTURETYPE)");

        let fetch = model.module("{M2}").unwrap();
        let Some(TaskSettings::Download(download)) = &fetch.tasks[0].settings else {
            panic!("unexpected task {:?}", fetch.tasks[0]);
        };
        let names: Vec<_> = download.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Pack", "zeta.txt"]);

        let project = model.project("{P1}").unwrap();
        assert_eq!(project.modules[0].name, "Fetch");
        assert_eq!(project.modules[1].name, "Reboot");
        assert!(model.resource("{nope}").is_none());
    }

    #[test]
    fn summaries_are_sorted_by_name() {
        let doc = sample();
        let model = build_model(doc.root()).unwrap();

        let resources: Vec<_> = model
            .resource_summary()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(resources, vec!["Alpha Pack", "zeta.txt"]);

        let modules: Vec<_> = model
            .module_summary()
            .iter()
            .map(|s| s.guid.as_str())
            .collect();
        assert_eq!(modules, vec!["{M2}", "{M1}"]);
        assert_eq!(model.project_summary().len(), 1);

        // Records themselves stay in document order
        assert_eq!(model.resources()[0].guid, "{R2}");
    }

    #[test]
    fn equal_names_keep_document_order() {
        let doc = Document::parse(&building_block_xml(
            &[
                resource_xml("{R9}", "FILESHARE", "same.txt"),
                resource_xml("{R1}", "FILESHARE", "same.txt"),
                resource_xml("{R5}", "FILESHARE", "aaa.txt"),
            ],
            &[],
            &[],
        ))
        .unwrap();
        let model = build_model(doc.root()).unwrap();

        let guids: Vec<_> = model
            .resource_summary()
            .iter()
            .map(|s| s.guid.as_str())
            .collect();
        assert_eq!(guids, vec!["{R5}", "{R9}", "{R1}"]);
    }

    #[test]
    fn abort_returns_first_failure() {
        let doc = broken();
        let err = build_model(doc.root()).unwrap_err();
        assert_eq!(err.entity_guid(), Some("{R2}"));
    }

    #[test]
    fn skip_records_failures() {
        let doc = broken();
        let model = build_model_with(doc.root(), &BuildConfig::lenient()).unwrap();

        assert_eq!(model.resources().len(), 1);
        assert_eq!(model.modules().len(), 1);
        assert!(!model.is_complete());

        let skipped: Vec<_> = model
            .failures()
            .iter()
            .map(|f| (f.collection, f.guid.as_deref()))
            .collect();
        assert_eq!(
            skipped,
            vec![
                (Collection::Resources, Some("{R2}")),
                (Collection::Resources, Some("{R3}"))
            ]
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        let doc = sample();
        let sequential = build_model(doc.root()).unwrap();
        let parallel = build_model_with(doc.root(), &BuildConfig::parallel()).unwrap();

        assert_eq!(sequential.resources(), parallel.resources());
        assert_eq!(sequential.modules(), parallel.modules());
        assert_eq!(sequential.projects(), parallel.projects());
        assert_eq!(sequential.module_summary(), parallel.module_summary());

        let broken = broken();
        let err = build_model_with(broken.root(), &BuildConfig::parallel()).unwrap_err();
        assert_eq!(err.entity_guid(), Some("{R2}"));
    }

    #[test]
    fn duplicate_guids() {
        let doc = Document::parse(&building_block_xml(
            &[],
            &[
                module_xml("{M1}", "First", &[]),
                module_xml("{M1}", "Second", &[]),
            ],
            &[],
        ))
        .unwrap();

        let err = build_model(doc.root()).unwrap_err();
        assert!(matches!(
            err,
            Error::AmbiguousReference {
                collection: Collection::Modules,
                count: 2,
                ..
            }
        ));

        let model = build_model_with(doc.root(), &BuildConfig::lenient()).unwrap();
        assert_eq!(model.modules().len(), 1);
        assert_eq!(model.module("{M1}").unwrap().title, "First");
        assert_eq!(model.failures().len(), 1);
    }

    #[test]
    fn module_fields_come_from_own_properties() {
        let hidden = "<task hidden=\"yes\"><properties>\
                        <type>FUTURETYPE</type><guid>{TASK}</guid><enabled>yes</enabled>\
                        <description>task text</description>\
                      </properties><settings/></task>";
        let doc = Document::parse(&building_block_xml(
            &[],
            &[format!(
                "<module><properties><name>NoGuid</name></properties><tasks>{hidden}</tasks></module>"
            )],
            &[],
        ))
        .unwrap();

        let err = build_model(doc.root()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { .. }), "{err:?}");

        let model = build_model_with(doc.root(), &BuildConfig::lenient()).unwrap();
        assert!(model.modules().is_empty());
        assert!(model.module("{TASK}").is_none());
        assert_eq!(model.failures().len(), 1);
        assert_eq!(model.failures()[0].guid, None);

        // A GUID without the remaining header fields is still rejected
        let doc = Document::parse(&building_block_xml(
            &[],
            &[format!(
                "<module><properties><name>Half</name><guid>{{M1}}</guid></properties>\
                 <tasks>{hidden}</tasks></module>"
            )],
            &[],
        ))
        .unwrap();
        let err = build_model(doc.root()).unwrap_err();
        assert_eq!(err.entity_guid(), Some("{M1}"));
        assert!(matches!(err.root_cause(), Error::MalformedDocument { .. }));
    }

    #[test]
    fn root_and_collection_shape() {
        let doc = Document::parse("<export><modules/></export>").unwrap();
        assert!(matches!(
            build_model(doc.root()),
            Err(Error::MalformedDocument { .. })
        ));

        let doc = Document::parse("<buildingblock/>").unwrap();
        let model = build_model(doc.root()).unwrap();
        assert!(model.resources().is_empty());
        assert!(model.module_summary().is_empty());

        let doc =
            Document::parse("<buildingblock><projects><module/></projects></buildingblock>")
                .unwrap();
        assert!(matches!(
            build_model(doc.root()),
            Err(Error::MalformedDocument { .. })
        ));
    }
}
