//! Tool definition system for OpenAI-compatible function calling.
//!
//! A [`Tool`] pairs metadata (name, description, input schema) with an async
//! handler. Schemas can be written three ways and are normalized to the JSON
//! Schema structure the chat completions API expects:
//!
//! - Simple type notation: `{"item_name": "string", "price": "number"}`
//! - Extended properties: `{"item_name": {"type": "string", "description": "..."}}`
//! - Full JSON Schema: `{"type": "object", "properties": {...}, "required": [...]}`
//!
//! Handlers are stored as `Arc<dyn Fn(Value) -> Pin<Box<dyn Future>>>` so tools
//! of different concrete handler types live in one registry and can be cloned
//! cheaply across async tasks.
//!
//! # Examples
//!
//! ```rust,no_run
//! use menu_scout::tool;
//! use serde_json::json;
//!
//! let lookup = tool("lookup_price", "Look up the price of a menu item")
//!     .param("item_name", "string")
//!     .build(|args| async move {
//!         let name = args["item_name"].as_str().unwrap_or("");
//!         Ok(json!({"item_name": name, "price": 6.50}))
//!     });
//! ```

use crate::Result;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for tool handler functions.
///
/// `Arc` makes handlers cheaply cloneable into registries and across tasks;
/// `Pin<Box<dyn Future>>` erases the concrete future type so handlers with
/// different bodies share one signature; `Send + Sync` bounds let the runtime
/// move and share them freely.
pub type ToolHandler =
    Arc<dyn Fn(Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> + Send + Sync>;

/// Tool definition for OpenAI-compatible function calling.
///
/// Immutable once created. Cloning is cheap: metadata fields are plain clones
/// and the handler is an `Arc` bump, so the same implementation is shared.
#[derive(Clone)]
pub struct Tool {
    /// Unique identifier, snake_case (e.g., `submit_final_answer`)
    name: String,

    /// Human-readable description; the model relies on this to decide when to
    /// invoke the tool
    description: String,

    /// Input parameters as normalized JSON Schema
    input_schema: Value,

    /// Async handler executing the tool's logic
    handler: ToolHandler,
}

impl Tool {
    /// Create a new tool.
    ///
    /// The schema may be simple type notation, extended properties, or full
    /// JSON Schema; it is normalized on construction (see module docs).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use menu_scout::Tool;
    /// use serde_json::json;
    ///
    /// let submit = Tool::new(
    ///     "submit_final_answer",
    ///     "Submit the final answer to the user's question",
    ///     json!({"answer": "string"}),
    ///     |args| Box::pin(async move { Ok(args) }),
    /// );
    /// ```
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        handler: F,
    ) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let name = name.into();
        let description = description.into();

        // Normalize whatever schema shape the caller provided
        let input_schema = convert_schema_to_openai(input_schema);

        Self {
            name,
            description,
            input_schema,
            handler: Arc::new(move |args| Box::pin(handler(args))),
        }
    }

    /// Execute the tool with the provided arguments.
    ///
    /// Arguments are a JSON object matching the input schema; the handler is
    /// responsible for extracting and validating them. Handler errors are
    /// propagated unchanged.
    pub async fn execute(&self, arguments: Value) -> Result<Value> {
        (self.handler)(arguments).await
    }

    /// Convert the tool definition to the `tools` array entry format of the
    /// chat completions API.
    pub fn to_openai_format(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema
            }
        })
    }

    /// Returns the tool's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tool's description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns a reference to the tool's input schema.
    pub fn input_schema(&self) -> &Value {
        &self.input_schema
    }
}

// Handler is omitted: closures have no useful debug representation.
impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Normalize a schema to OpenAI's JSON Schema format.
///
/// A schema that already carries `"type"` and `"properties"` passes through
/// unchanged. Otherwise each entry is treated either as simple type notation
/// (`"price": "number"` — always required) or an extended property object,
/// where `"optional": true`, `"required": false`, or a `"default"` value keep
/// the parameter out of the `required` array. The non-standard `optional` and
/// `required` keys are stripped from the emitted property.
fn convert_schema_to_openai(schema: Value) -> Value {
    if let Some(obj) = schema.as_object() {
        if obj.contains_key("type") && obj.contains_key("properties") {
            // Already a full JSON Schema
            return schema;
        }

        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for (param_name, param_type) in obj {
            if let Some(type_str) = param_type.as_str() {
                // Simple notation: always required
                properties.insert(param_name.clone(), type_to_json_schema(type_str));
                required.push(param_name.clone());
            } else if param_type.is_object() {
                let mut prop = param_type.clone();
                let prop_obj = prop
                    .as_object_mut()
                    .expect("object check above guarantees a map");

                let is_optional = prop_obj
                    .remove("optional")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                let is_required = prop_obj.remove("required").and_then(|v| v.as_bool());
                let has_default = prop_obj.contains_key("default");

                properties.insert(param_name.clone(), prop);

                if let Some(true) = is_required {
                    required.push(param_name.clone());
                } else if is_optional || is_required == Some(false) {
                    // Explicitly optional
                } else if !has_default {
                    required.push(param_name.clone());
                }
            }
        }

        return serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        });
    }

    // Non-object input: fall back to an empty object schema
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

/// Map a friendly type string to a JSON Schema type object.
///
/// Accepts standard JSON Schema names plus common Rust and Python spellings;
/// unknown strings default to `"string"` rather than erroring.
fn type_to_json_schema(type_str: &str) -> Value {
    let json_type = match type_str {
        "string" | "str" => "string",
        "integer" | "int" | "i32" | "i64" | "u32" | "u64" => "integer",
        "number" | "float" | "f32" | "f64" => "number",
        "boolean" | "bool" => "boolean",
        "array" | "list" | "vec" => "array",
        "object" | "dict" | "map" => "object",
        _ => "string",
    };

    serde_json::json!({ "type": json_type })
}

/// Builder for creating tools with a fluent API.
///
/// Add parameters with [`param`](ToolBuilder::param) /
/// [`optional_param`](ToolBuilder::optional_param), or set a complete schema
/// with [`schema`](ToolBuilder::schema) — use one approach, not both, since
/// `schema` replaces anything added earlier.
pub struct ToolBuilder {
    name: String,
    description: String,
    schema: Value,
}

impl ToolBuilder {
    /// Start building a new tool with a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema: serde_json::json!({}),
        }
    }

    /// Replace the input schema wholesale.
    pub fn schema(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    /// Add a required parameter using simple type notation.
    pub fn param(mut self, name: impl Into<String>, param_type: impl Into<String>) -> Self {
        if !self.schema.is_object() {
            self.schema = serde_json::json!({});
        }
        if let Some(obj) = self.schema.as_object_mut() {
            obj.insert(name.into(), Value::String(param_type.into()));
        }
        self
    }

    /// Add an optional parameter using simple type notation.
    pub fn optional_param(
        mut self,
        name: impl Into<String>,
        param_type: impl Into<String>,
    ) -> Self {
        if !self.schema.is_object() {
            self.schema = serde_json::json!({});
        }
        if let Some(obj) = self.schema.as_object_mut() {
            obj.insert(
                name.into(),
                serde_json::json!({
                    "type": type_to_json_schema(&param_type.into())["type"],
                    "optional": true
                }),
            );
        }
        self
    }

    /// Finalize the tool with its handler.
    pub fn build<F, Fut>(self, handler: F) -> Tool
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Tool::new(self.name, self.description, self.schema, handler)
    }
}

/// Convenience function to start a [`ToolBuilder`].
pub fn tool(name: impl Into<String>, description: impl Into<String>) -> ToolBuilder {
    ToolBuilder::new(name, description)
}
