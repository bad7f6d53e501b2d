use serde::Serialize;

use crate::{file::Element, metadata::codes::parameter_type_name, Result};

/// A module or project parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Semantic type, `"Unknown"` for unrecognized codes
    pub param_type: &'static str,
    /// Raw type code as found in the export
    pub type_code: String,
    /// Default value, empty if the export has none
    pub value: String,
    /// Free text description
    pub description: String,
}

/// Extracts one parameter element.
///
/// # Errors
/// Returns [`crate::Error::MalformedDocument`] if the parameter has no name or type.
pub fn extract_parameter(element: &Element) -> Result<Parameter> {
    let type_code = element.require_child_text("type")?;
    Ok(Parameter {
        name: element.require_child_text("name")?,
        param_type: parameter_type_name(&type_code),
        type_code,
        value: element.child_text_or_default("value1"),
        description: element.child_text_or_default("description"),
    })
}

/// Extracts all children of a `parameters` element, sorted by name.
///
/// An absent `parameters` element yields an empty list.
///
/// # Errors
/// Propagates the first failing [`extract_parameter`].
pub fn extract_parameters(root: Option<&Element>) -> Result<Vec<Parameter>> {
    let Some(root) = root else {
        return Ok(Vec::new());
    };

    let mut parameters = root
        .children()
        .map(extract_parameter)
        .collect::<Result<Vec<_>>>()?;
    parameters.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    #[test]
    fn reads_and_sorts() {
        let doc = Document::parse(
            "<parameters>\
               <param><name>zeta</name><type>0</type><value1>42</value1><description>last</description></param>\
               <param><name>alpha</name><type>7</type><description/></param>\
             </parameters>",
        )
        .unwrap();

        let params = extract_parameters(Some(doc.root())).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "alpha");
        assert_eq!(params[0].param_type, "Unknown");
        assert_eq!(params[0].type_code, "7");
        assert_eq!(params[0].value, "");
        assert_eq!(params[1].name, "zeta");
        assert_eq!(params[1].param_type, "Text");
        assert_eq!(params[1].value, "42");
        assert_eq!(params[1].description, "last");
    }

    #[test]
    fn absent_root() {
        assert!(extract_parameters(None).unwrap().is_empty());
    }

    #[test]
    fn name_required() {
        let doc = Document::parse("<parameters><param><type>0</type></param></parameters>").unwrap();
        assert!(extract_parameters(Some(doc.root())).is_err());
    }
}
