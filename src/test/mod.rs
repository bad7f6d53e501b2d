//! Fixture builders shared by the unit tests.
//!
//! The helpers produce XML snippets shaped like real building block exports so that tests
//! exercise the reader and the extractors together.

/// A resource element. Packages are named through `name`, all other kinds through `file`.
pub fn resource_xml(guid: &str, resource_type: &str, label: &str) -> String {
    let label_field = if resource_type == "AMRESOURCEPACKAGE" {
        format!("<name>{label}</name>")
    } else {
        format!("<file>{label}</file>")
    };

    format!(
        "<resource><properties>\
           <guid>{guid}</guid><type>{resource_type}</type>{label_field}\
           <version>3</version><versioncomment>updated</versioncomment>\
           <enabled>yes</enabled><comment>fixture</comment>\
           <parsefilecontent>yes</parsefilecontent>\
           <skipenvironmentvariables>no</skipenvironmentvariables>\
           <crc32>1A2B3C4D</crc32>\
           <path>\\\\server\\share\\{label}</path>\
           <urlresource>https://example.org/{label}</urlresource>\
           <folder><name>Resources</name><name>Scripts</name></folder>\
         </properties></resource>"
    )
}

/// A task element with the given settings body.
pub fn task_xml(guid: &str, task_type: &str, settings: &str, hidden: bool) -> String {
    let hidden = if hidden { " hidden=\"yes\"" } else { "" };
    format!(
        "<task{hidden}><properties>\
           <type>{task_type}</type><guid>{guid}</guid><enabled>yes</enabled>\
         </properties><settings>{settings}</settings></task>"
    )
}

/// A module element wrapping already rendered task elements.
pub fn module_xml(guid: &str, name: &str, tasks: &[String]) -> String {
    format!(
        "<module><properties>\
           <name>{name}</name><guid>{guid}</guid><enabled>yes</enabled>\
           <description>{name} description</description>\
           <version>1</version><versioncomment>initial</versioncomment>\
           <folder><name>Modules</name></folder>\
         </properties><tasks>{}</tasks></module>",
        tasks.concat()
    )
}

/// A project element referencing modules as `(guid, enabled)` pairs.
pub fn project_xml(guid: &str, name: &str, modules: &[(&str, bool)]) -> String {
    let refs: String = modules
        .iter()
        .map(|(module, enabled)| {
            format!(
                "<module><guid>{module}</guid><enabled>{}</enabled></module>",
                if *enabled { "yes" } else { "no" }
            )
        })
        .collect();

    format!(
        "<project><properties>\
           <name>{name}</name><guid>{guid}</guid><enabled>yes</enabled>\
           <description>{name} description</description>\
           <version>2</version><versioncomment>second</versioncomment>\
           <parameters>\
             <param><name>target</name><type>0</type><value1>server01</value1><description>host</description></param>\
           </parameters>\
         </properties><modules>{refs}</modules></project>"
    )
}

/// A complete export from rendered collection items.
pub fn building_block_xml(resources: &[String], modules: &[String], projects: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <buildingblock>\
           <resources>{}</resources>\
           <modules>{}</modules>\
           <projects>{}</projects>\
         </buildingblock>",
        resources.concat(),
        modules.concat(),
        projects.concat()
    )
}
