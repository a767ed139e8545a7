//! A small CloudFormation object model.
//!
//! A [`Template`] accumulates parameters, resources and outputs. Every
//! `add_*` call hands back a [`LogicalId`] which is the only way to build
//! `Ref`/`Fn::GetAtt` expressions, so wiring is done through handles
//! rather than strings. Rendering sorts every key, which keeps the output
//! byte-for-byte stable between runs.

pub mod expr;
pub mod output;
pub mod parameter;
pub mod policy;
pub mod resources;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use self::expr::{Expr, PSEUDO_PARAMETERS};
use self::output::Output;
use self::parameter::Parameter;
use self::resources::{DeletionPolicy, Resource, ResourceOptions};

pub const FORMAT_VERSION: &str = "2010-09-09";

pub const MAX_PARAMETERS: usize = 200;
pub const MAX_RESOURCES: usize = 500;
pub const MAX_OUTPUTS: usize = 200;

const MAX_LOGICAL_ID_LENGTH: usize = 255;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Invalid logical ID `{0}`: expected 1 to 255 alphanumeric characters")]
    InvalidLogicalId(String),

    #[error("Duplicate logical ID `{id}` in {section}")]
    DuplicateLogicalId { section: &'static str, id: String },

    #[error("Too many {section}: the limit is {limit}")]
    LimitExceeded { section: &'static str, limit: usize },

    #[error("Invalid parameter `{id}`: {reason}")]
    InvalidParameter { id: String, reason: String },

    #[error("`{from}` references `{target}` which is not declared")]
    DanglingReference { from: String, target: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Handle to a declared parameter, resource or output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalId(String);

impl LogicalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{"Ref": id}`
    pub fn reference(&self) -> Expr {
        Expr::Ref(self.0.clone())
    }

    /// `{"Fn::GetAtt": [id, attribute]}`
    pub fn attribute(&self, attribute: &str) -> Expr {
        Expr::GetAtt(self.0.clone(), attribute.to_string())
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceEntry {
    #[serde(rename = "Type")]
    kind: &'static str,

    #[serde(skip_serializing_if = "is_empty_object")]
    properties: Value,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    deletion_policy: Option<DeletionPolicy>,
}

fn is_empty_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

#[derive(Debug, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: &'static str,

    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(rename = "Parameters", skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, Parameter>,

    #[serde(rename = "Resources")]
    resources: BTreeMap<String, ResourceEntry>,

    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, Value>,
}

impl Template {
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            description,
            parameters: BTreeMap::new(),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn add_parameter(&mut self, id: &str, parameter: Parameter) -> Result<LogicalId, Error> {
        validate_logical_id(id)?;
        if self.parameters.contains_key(id) || self.resources.contains_key(id) {
            return Err(Error::DuplicateLogicalId {
                section: "Parameters",
                id: id.to_string(),
            });
        }
        if self.parameters.len() >= MAX_PARAMETERS {
            return Err(Error::LimitExceeded {
                section: "Parameters",
                limit: MAX_PARAMETERS,
            });
        }
        parameter
            .validate()
            .map_err(|reason| Error::InvalidParameter {
                id: id.to_string(),
                reason,
            })?;

        self.parameters.insert(id.to_string(), parameter);
        tracing::trace!(id, "added parameter");

        return Ok(LogicalId(id.to_string()));
    }

    pub fn add_resource<R: Resource>(&mut self, id: &str, resource: R) -> Result<LogicalId, Error> {
        self.add_resource_with(id, resource, ResourceOptions::default())
    }

    pub fn add_resource_with<R: Resource>(
        &mut self,
        id: &str,
        resource: R,
        options: ResourceOptions,
    ) -> Result<LogicalId, Error> {
        validate_logical_id(id)?;
        if self.resources.contains_key(id) || self.parameters.contains_key(id) {
            return Err(Error::DuplicateLogicalId {
                section: "Resources",
                id: id.to_string(),
            });
        }
        if self.resources.len() >= MAX_RESOURCES {
            return Err(Error::LimitExceeded {
                section: "Resources",
                limit: MAX_RESOURCES,
            });
        }

        let entry = ResourceEntry {
            kind: R::RESOURCE_TYPE,
            properties: serde_json::to_value(&resource)?,
            depends_on: options
                .depends_on
                .iter()
                .map(|dependency| dependency.as_str().to_string())
                .collect(),
            deletion_policy: options.deletion_policy,
        };
        self.resources.insert(id.to_string(), entry);
        tracing::trace!(id, kind = R::RESOURCE_TYPE, "added resource");

        return Ok(LogicalId(id.to_string()));
    }

    pub fn add_output(&mut self, id: &str, output: Output) -> Result<LogicalId, Error> {
        validate_logical_id(id)?;
        if self.outputs.contains_key(id) {
            return Err(Error::DuplicateLogicalId {
                section: "Outputs",
                id: id.to_string(),
            });
        }
        if self.outputs.len() >= MAX_OUTPUTS {
            return Err(Error::LimitExceeded {
                section: "Outputs",
                limit: MAX_OUTPUTS,
            });
        }

        self.outputs.insert(id.to_string(), serde_json::to_value(&output)?);
        tracing::trace!(id, "added output");

        return Ok(LogicalId(id.to_string()));
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Checks that every `Ref`, `Fn::GetAtt` and `DependsOn` names something
    /// declared in this template.
    pub fn verify(&self) -> Result<(), Error> {
        let resources: BTreeSet<&str> = self.resources.keys().map(String::as_str).collect();
        let referable: BTreeSet<&str> = resources
            .iter()
            .copied()
            .chain(self.parameters.keys().map(String::as_str))
            .chain(PSEUDO_PARAMETERS.iter().copied())
            .collect();

        let sources = self
            .resources
            .iter()
            .map(|(id, entry)| (id, &entry.properties))
            .chain(self.outputs.iter());

        for (from, value) in sources {
            let mut references = Vec::new();
            collect_references(value, &mut references);

            for reference in references {
                let resolved = match reference {
                    Reference::Ref(target) => referable.contains(target),
                    Reference::GetAtt(target) => resources.contains(target),
                };
                if !resolved {
                    return Err(Error::DanglingReference {
                        from: from.clone(),
                        target: reference.target().to_string(),
                    });
                }
            }
        }

        for (from, entry) in &self.resources {
            for dependency in &entry.depends_on {
                if !resources.contains(dependency.as_str()) {
                    return Err(Error::DanglingReference {
                        from: from.clone(),
                        target: dependency.clone(),
                    });
                }
            }
        }

        return Ok(());
    }

    pub fn to_value(&self) -> Result<Value, Error> {
        Ok(serde_json::to_value(self)?)
    }

    /// Single-line rendering, for sending the template over the API.
    pub fn to_compact_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_value()?)?)
    }

    /// Renders the template with sorted keys and four-space indentation.
    pub fn to_json(&self) -> Result<String, Error> {
        // Going through `Value` sorts keys at every level, struct fields included.
        let value = self.to_value()?;

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer)?;

        String::from_utf8(buffer).map_err(|error| Error::SerializationError(error.to_string()))
    }
}

fn validate_logical_id(id: &str) -> Result<(), Error> {
    let valid = !id.is_empty()
        && id.len() <= MAX_LOGICAL_ID_LENGTH
        && id.chars().all(|c| c.is_ascii_alphanumeric());
    if !valid {
        return Err(Error::InvalidLogicalId(id.to_string()));
    }

    return Ok(());
}

#[derive(Debug, Clone, Copy)]
enum Reference<'a> {
    Ref(&'a str),
    GetAtt(&'a str),
}

impl<'a> Reference<'a> {
    fn target(&self) -> &'a str {
        match self {
            Reference::Ref(target) | Reference::GetAtt(target) => *target,
        }
    }
}

fn collect_references<'a>(value: &'a Value, found: &mut Vec<Reference<'a>>) {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(target)) = map.get("Ref") {
                    found.push(Reference::Ref(target));
                    return;
                }
                if let Some(Value::Array(arguments)) = map.get("Fn::GetAtt") {
                    if let Some(Value::String(target)) = arguments.first() {
                        found.push(Reference::GetAtt(target));
                    }
                    return;
                }
            }
            for nested in map.values() {
                collect_references(nested, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_references(item, found);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::output::Output;
    use super::parameter::Parameter;
    use super::resources::sqs::Queue;
    use super::resources::{DeletionPolicy, ResourceOptions};
    use super::{Error, Template};
    use crate::template::expr::Expr;

    fn queue(name: &str) -> Queue {
        Queue {
            queue_name: Expr::from(name),
        }
    }

    #[test]
    fn rejects_non_alphanumeric_logical_id() {
        let mut template = Template::new(None);

        let result = template.add_resource("default-queue", queue("default"));
        assert_eq!(
            Err(Error::InvalidLogicalId(String::from("default-queue"))),
            result
        );
    }

    #[test]
    fn rejects_duplicate_resource() {
        let mut template = Template::new(None);
        template.add_resource("DefaultQueue", queue("a")).unwrap();

        let result = template.add_resource("DefaultQueue", queue("b"));
        match result.err().unwrap() {
            Error::DuplicateLogicalId { .. } => {}
            _ => panic!("Expected `DuplicateLogicalId` error"),
        }
    }

    #[test]
    fn rejects_resource_shadowing_parameter() {
        let mut template = Template::new(None);
        template.add_parameter("Environment", Parameter::string()).unwrap();

        let result = template.add_resource("Environment", queue("a"));
        assert_eq!(true, result.is_err());
    }

    #[test]
    fn allows_output_named_after_resource() {
        let mut template = Template::new(None);
        let queue_id = template.add_resource("DefaultQueue", queue("a")).unwrap();

        let result = template.add_output(
            "DefaultQueue",
            Output::new("The URI of the default queue", queue_id.reference()),
        );
        assert_eq!(false, result.is_err());
    }

    #[test]
    fn rejects_invalid_parameter() {
        let mut template = Template::new(None);

        let result = template.add_parameter("Count", Parameter::number().default("many"));
        match result.err().unwrap() {
            Error::InvalidParameter { id, .. } => assert_eq!("Count", id),
            _ => panic!("Expected `InvalidParameter` error"),
        }
    }

    #[test]
    fn enforces_parameter_limit() {
        let mut template = Template::new(None);
        for index in 0..super::MAX_PARAMETERS {
            template
                .add_parameter(&format!("Parameter{}", index), Parameter::string())
                .unwrap();
        }

        let result = template.add_parameter("OneTooMany", Parameter::string());
        assert_eq!(
            Err(Error::LimitExceeded {
                section: "Parameters",
                limit: super::MAX_PARAMETERS
            }),
            result
        );
    }

    #[test]
    fn enforces_resource_limit() {
        let mut template = Template::new(None);
        for index in 0..super::MAX_RESOURCES {
            template
                .add_resource(&format!("Queue{}", index), queue("q"))
                .unwrap();
        }

        let result = template.add_resource("OneTooMany", queue("q"));
        assert_eq!(
            Err(Error::LimitExceeded {
                section: "Resources",
                limit: super::MAX_RESOURCES
            }),
            result
        );
    }

    #[test]
    fn enforces_output_limit() {
        let mut template = Template::new(None);
        for index in 0..super::MAX_OUTPUTS {
            template
                .add_output(&format!("Output{}", index), Output::new("Output", Expr::from("x")))
                .unwrap();
        }

        let result = template.add_output("OneTooMany", Output::new("Output", Expr::from("x")));
        assert_eq!(
            Err(Error::LimitExceeded {
                section: "Outputs",
                limit: super::MAX_OUTPUTS
            }),
            result
        );
    }

    #[test]
    fn logical_id_length_is_bounded() {
        let mut template = Template::new(None);
        let longest = "A".repeat(255);
        let too_long = "A".repeat(256);

        assert_eq!(false, template.add_resource(&longest, queue("q")).is_err());
        assert_eq!(
            Err(Error::InvalidLogicalId(too_long.clone())),
            template.add_resource(&too_long, queue("q"))
        );
    }

    #[test]
    fn rejects_parameter_shadowing_resource() {
        let mut template = Template::new(None);
        template.add_resource("Environment", queue("a")).unwrap();

        let result = template.add_parameter("Environment", Parameter::string());
        match result.err().unwrap() {
            Error::DuplicateLogicalId { section, id } => {
                assert_eq!("Parameters", section);
                assert_eq!("Environment", id);
            }
            _ => panic!("Expected `DuplicateLogicalId` error"),
        }
    }

    #[test]
    fn verify_detects_undeclared_dependency() {
        let mut template = Template::new(None);
        let mut other = Template::new(None);
        let missing = other.add_resource("Missing", queue("missing")).unwrap();
        template
            .add_resource_with(
                "Queue",
                queue("q"),
                ResourceOptions {
                    depends_on: vec![missing],
                    deletion_policy: None,
                },
            )
            .unwrap();

        assert_eq!(
            Err(Error::DanglingReference {
                from: String::from("Queue"),
                target: String::from("Missing")
            }),
            template.verify()
        );
    }

    #[test]
    fn verify_detects_dangling_ref() {
        let mut template = Template::new(None);
        template
            .add_resource(
                "DefaultQueue",
                Queue {
                    queue_name: Expr::Ref(String::from("Environment")),
                },
            )
            .unwrap();

        assert_eq!(
            Err(Error::DanglingReference {
                from: String::from("DefaultQueue"),
                target: String::from("Environment")
            }),
            template.verify()
        );
    }

    #[test]
    fn verify_rejects_get_att_on_parameter() {
        let mut template = Template::new(None);
        let environment = template.add_parameter("Environment", Parameter::string()).unwrap();
        template
            .add_output("Broken", Output::new("Broken", environment.attribute("Arn")))
            .unwrap();

        assert_eq!(true, template.verify().is_err());
    }

    #[test]
    fn verify_accepts_pseudo_parameters_and_declared_targets() {
        let mut template = Template::new(None);
        let environment = template.add_parameter("Environment", Parameter::string()).unwrap();
        let queue_id = template
            .add_resource(
                "DefaultQueue",
                Queue {
                    queue_name: Expr::join("-", vec![environment.reference(), Expr::region()]),
                },
            )
            .unwrap();
        template
            .add_output("DefaultQueueArn", Output::new("Arn", queue_id.attribute("Arn")))
            .unwrap();

        assert_eq!(Ok(()), template.verify());
    }

    #[test]
    fn writes_resource_attributes() {
        let mut template = Template::new(Some(String::from("Queues")));
        let first = template.add_resource("First", queue("first")).unwrap();
        template
            .add_resource_with(
                "Second",
                queue("second"),
                ResourceOptions {
                    depends_on: vec![first],
                    deletion_policy: Some(DeletionPolicy::Retain),
                },
            )
            .unwrap();

        let value = template.to_value().unwrap();
        assert_eq!(
            json!({
                "Type": "AWS::SQS::Queue",
                "Properties": {"QueueName": "second"},
                "DependsOn": ["First"],
                "DeletionPolicy": "Retain"
            }),
            value["Resources"]["Second"]
        );
        assert_eq!(json!("2010-09-09"), value["AWSTemplateFormatVersion"]);
        assert_eq!(json!("Queues"), value["Description"]);
        assert_eq!(Ok(()), template.verify());
    }

    #[test]
    fn renders_sorted_keys_with_four_space_indent() {
        let mut template = Template::new(None);
        template.add_resource("Queue", queue("q")).unwrap();

        let rendered = template.to_json().unwrap();
        assert_eq!(
            "{\n    \"AWSTemplateFormatVersion\": \"2010-09-09\",\n    \"Resources\": {\n        \"Queue\": {\n            \"Properties\": {\n                \"QueueName\": \"q\"\n            },\n            \"Type\": \"AWS::SQS::Queue\"\n        }\n    }\n}",
            rendered
        );
    }
}
