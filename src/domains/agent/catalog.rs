//! Tool metadata as seen by the front end.
//!
//! A [`ToolCatalog`] is the snapshot of [`ToolDescriptor`]s fetched once when
//! a session starts. It is never refreshed.

use rmcp::model::Tool;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Parameter name to string value, as typed (or proposed) in the UI.
pub type ArgumentMap = BTreeMap<String, String>;

/// JSON-schema type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    #[serde(untagged)]
    Other(String),
}

impl DeclaredType {
    /// Read the `type` keyword of a property schema.
    ///
    /// Nullable types (`["integer", "null"]`) resolve to the non-null member.
    /// Missing types default to string, which is how the UI renders them.
    pub fn from_schema(schema: &Value) -> Self {
        let name = match schema.get("type") {
            Some(Value::String(name)) => Some(name.as_str()),
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(Value::as_str)
                .find(|name| *name != "null"),
            _ => None,
        };

        match name.unwrap_or("string") {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            other => Self::Other(other.to_string()),
        }
    }

    /// Label shown next to an input field.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Other(name) => name,
        }
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: DeclaredType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
}

impl ParameterSpec {
    /// Build a required string parameter.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: DeclaredType::String,
            description: None,
            required: true,
        }
    }

    /// Convert a UI string into the JSON value sent to the registry.
    ///
    /// Returns `None` for an empty optional value so the server default applies.
    /// Values that do not parse as their declared type are sent as strings and
    /// left for the server to reject.
    pub fn to_json(&self, raw: &str) -> Option<Value> {
        let trimmed = raw.trim();
        if trimmed.is_empty() && !self.required {
            return None;
        }

        let parsed = match self.declared_type {
            DeclaredType::Integer => trimmed.parse::<i64>().ok().map(Value::from),
            DeclaredType::Number => trimmed.parse::<f64>().ok().map(Value::from),
            DeclaredType::Boolean => trimmed.parse::<bool>().ok().map(Value::from),
            DeclaredType::Array | DeclaredType::Object => serde_json::from_str(trimmed).ok(),
            DeclaredType::String | DeclaredType::Other(_) => None,
        };

        Some(parsed.unwrap_or_else(|| Value::String(raw.to_string())))
    }
}

/// Metadata bundle describing one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolDescriptor {
    /// Build a descriptor from an MCP tool model.
    ///
    /// Parameters keep the declaration order of `inputSchema.properties`.
    pub fn from_tool(tool: &Tool) -> Self {
        let required: HashSet<&str> = tool
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let parameters = tool
            .input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, schema)| ParameterSpec {
                        name: name.clone(),
                        declared_type: DeclaredType::from_schema(schema),
                        description: schema
                            .get("description")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        required: required.contains(name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: tool.name.to_string(),
            description: tool.description.as_deref().unwrap_or_default().to_string(),
            parameters,
        }
    }

    /// Convert UI arguments into the JSON object sent with `tools/call`.
    ///
    /// Arguments that do not name a declared parameter are passed through as
    /// strings.
    pub fn to_json_arguments(&self, arguments: &ArgumentMap) -> Map<String, Value> {
        let mut object = Map::new();

        for param in &self.parameters {
            let raw = arguments.get(&param.name).map(String::as_str).unwrap_or("");
            if let Some(value) = param.to_json(raw) {
                object.insert(param.name.clone(), value);
            }
        }

        for (name, value) in arguments {
            if !object.contains_key(name) && self.parameter(name).is_none() {
                object.insert(name.clone(), Value::String(value.clone()));
            }
        }

        object
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Read-only snapshot of the tools available in a session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
    #[serde(skip)]
    names: HashSet<String>,
}

impl ToolCatalog {
    /// Build a catalog from descriptors in listing order.
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        let names = tools.iter().map(|t| t.name.clone()).collect();
        Self { tools, names }
    }

    /// All descriptors, in listing order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Names of the available tools.
    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolRegistry;

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolRegistry::get_all_tools()
            .iter()
            .map(ToolDescriptor::from_tool)
            .find(|d| d.name == name)
            .unwrap()
    }

    #[test]
    fn test_declared_type_from_schema() {
        let nullable = serde_json::json!({ "type": ["integer", "null"] });
        assert_eq!(DeclaredType::from_schema(&nullable), DeclaredType::Integer);
        assert_eq!(
            DeclaredType::from_schema(&serde_json::json!({})),
            DeclaredType::String
        );
        assert_eq!(
            DeclaredType::from_schema(&serde_json::json!({ "type": "uuid" })),
            DeclaredType::Other("uuid".to_string())
        );
    }

    #[test]
    fn test_descriptor_from_registry_tool() {
        let search = descriptor("web_search");
        assert_eq!(search.description, "Search the web for information");

        let names: Vec<_> = search.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["query", "max_results"]);

        let query = search.parameter("query").unwrap();
        assert!(query.required);
        assert_eq!(query.declared_type, DeclaredType::String);
        assert_eq!(query.description.as_deref(), Some("The search query to look up"));

        let max = search.parameter("max_results").unwrap();
        assert!(!max.required);
        assert_eq!(max.declared_type, DeclaredType::Integer);
    }

    #[test]
    fn test_to_json_arguments_converts_and_omits() {
        let search = descriptor("web_search");

        let mut args = ArgumentMap::new();
        args.insert("query".to_string(), "rust vs go".to_string());
        args.insert("max_results".to_string(), "".to_string());
        let json = search.to_json_arguments(&args);
        assert_eq!(json.get("query"), Some(&Value::from("rust vs go")));
        assert!(!json.contains_key("max_results"));

        args.insert("max_results".to_string(), " 5 ".to_string());
        let json = search.to_json_arguments(&args);
        assert_eq!(json.get("max_results"), Some(&Value::from(5)));

        args.insert("max_results".to_string(), "many".to_string());
        let json = search.to_json_arguments(&args);
        assert_eq!(json.get("max_results"), Some(&Value::from("many")));
    }

    #[test]
    fn test_required_string_kept_when_empty() {
        let hello = descriptor("say_hello");
        let json = hello.to_json_arguments(&ArgumentMap::new());
        assert_eq!(json.get("name"), Some(&Value::from("")));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = ToolCatalog::new(vec![descriptor("say_hello"), descriptor("web_search")]);
        assert!(catalog.names().contains("say_hello"));
        assert!(catalog.get("reddit_scrape").is_none());
        assert_eq!(catalog.tools()[1].name, "web_search");
        assert!(!catalog.is_empty());
    }
}
