//! Schema type definitions for task parameter modeling.
//!
//! This module defines the core data model used to represent callable tasks
//! discovered in a runfile. The types are designed for serialization with
//! [`serde`] and can round-trip through JSON and YAML.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Leading marker that makes a task or namespace name private.
///
/// Names carrying this marker are never registered by discovery and are
/// rejected at invocation time before existence is even checked.
pub const PRIVACY_MARKER: char = '_';

/// Reserved constructor name, never callable as a task.
pub const CONSTRUCTOR_NAME: &str = "constructor";

/// Returns `true` if the name carries the privacy marker.
///
/// # Examples
///
/// ```
/// use runfile_core::is_private_name;
///
/// assert!(is_private_name("_cleanup"));
/// assert!(!is_private_name("build"));
/// ```
pub fn is_private_name(name: &str) -> bool {
    name.starts_with(PRIVACY_MARKER)
}

/// Returns `true` if the name is private or the reserved constructor name.
///
/// # Examples
///
/// ```
/// use runfile_core::is_reserved_name;
///
/// assert!(is_reserved_name("_cleanup"));
/// assert!(is_reserved_name("constructor"));
/// assert!(!is_reserved_name("deploy"));
/// ```
pub fn is_reserved_name(name: &str) -> bool {
    is_private_name(name) || name == CONSTRUCTOR_NAME
}

/// Declared type of a task parameter.
///
/// Inferred from the type annotation in the task signature (e.g.
/// `string[]` → `Array`, `Record<string, string>` → `Object`). Parameters
/// without an annotation default to `String`.
///
/// # Examples
///
/// ```
/// use runfile_core::ParamType;
///
/// let pt = ParamType::default();
/// assert_eq!(pt, ParamType::String);
/// assert_eq!(ParamType::Number.to_string(), "number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Free-form text (the default).
    #[default]
    String,
    /// Numeric value, integer-preferred.
    Number,
    /// Boolean switch.
    Boolean,
    /// Structured value supplied as a JSON object literal.
    Object,
    /// Sequence value supplied as a JSON array literal.
    Array,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
            ParamType::Array => "array",
        };
        write!(f, "{name}")
    }
}

/// Flag binding for a task parameter.
///
/// Every non-rest parameter gets a long flag derived from its name; doc
/// directives can add a short form and any number of long aliases. Keys are
/// stored with their dashes (e.g. `--env`, `-e`).
///
/// # Examples
///
/// ```
/// use runfile_core::FlagSpec;
///
/// let flag = FlagSpec::for_param("retries")
///     .with_short("-r")
///     .with_alias("--attempts");
///
/// assert_eq!(flag.long, "--retries");
/// assert!(flag.matches("-r"));
/// assert!(flag.matches("--attempts"));
/// assert!(!flag.matches("--count"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSpec {
    /// Long form derived from the parameter name (e.g. "--env")
    pub long: String,
    /// Optional short form (e.g. "-e")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Additional long forms, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl FlagSpec {
    /// Creates the flag binding for a parameter name.
    ///
    /// # Examples
    ///
    /// ```
    /// use runfile_core::FlagSpec;
    ///
    /// let flag = FlagSpec::for_param("env");
    /// assert_eq!(flag.long, "--env");
    /// assert!(flag.short.is_none());
    /// ```
    pub fn for_param(name: &str) -> Self {
        Self {
            long: format!("--{name}"),
            short: None,
            aliases: Vec::new(),
        }
    }

    /// Sets the short form.
    pub fn with_short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    /// Adds a long alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Checks if this flag matches a given token (long, short, or alias form).
    ///
    /// # Examples
    ///
    /// ```
    /// use runfile_core::FlagSpec;
    ///
    /// let flag = FlagSpec::for_param("verbose").with_short("-v");
    /// assert!(flag.matches("--verbose"));
    /// assert!(flag.matches("-v"));
    /// assert!(!flag.matches("--quiet"));
    /// ```
    pub fn matches(&self, token: &str) -> bool {
        self.long == token
            || self.short.as_deref() == Some(token)
            || self.aliases.iter().any(|alias| alias == token)
    }

    /// Returns the long form without its leading dashes.
    pub fn long_key(&self) -> &str {
        self.long.trim_start_matches('-')
    }

    /// Returns the short form without its leading dash, if any.
    pub fn short_key(&self) -> Option<&str> {
        self.short.as_deref().map(|s| s.trim_start_matches('-'))
    }

    /// Returns the alias forms without their leading dashes, in order.
    pub fn alias_keys(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(|a| a.trim_start_matches('-'))
    }

    /// Returns every flag token, long form first.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = vec![self.long.as_str()];
        if let Some(short) = self.short.as_deref() {
            tokens.push(short);
        }
        tokens.extend(self.aliases.iter().map(String::as_str));
        tokens
    }
}

/// Schema for a single task parameter.
///
/// Built from one entry of a task signature. A parameter is required unless
/// the signature gives it a default value; a rest parameter absorbs all
/// remaining positional tokens and never binds a flag.
///
/// # Examples
///
/// ```
/// use runfile_core::{ParamSchema, ParamType};
///
/// let env = ParamSchema::required("env", ParamType::String);
/// assert!(env.required);
/// assert_eq!(env.usage_token(), "<env>");
///
/// let files = ParamSchema::rest("files", ParamType::Array);
/// assert!(files.rest);
/// assert!(files.flag.is_none());
/// assert_eq!(files.usage_token(), "[files...]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSchema {
    /// Name of the parameter (e.g. "env", "count")
    pub name: String,
    /// Declared value type
    pub param_type: ParamType,
    /// Is this parameter required?
    pub required: bool,
    /// Does this parameter absorb all remaining positional tokens?
    pub rest: bool,
    /// Flag binding; `None` for rest parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<FlagSpec>,
}

impl ParamSchema {
    /// Creates a required parameter with its derived long flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use runfile_core::{ParamSchema, ParamType};
    ///
    /// let param = ParamSchema::required("target", ParamType::String);
    /// assert!(param.required);
    /// assert_eq!(param.flag.unwrap().long, "--target");
    /// ```
    pub fn required(name: &str, param_type: ParamType) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            required: true,
            rest: false,
            flag: Some(FlagSpec::for_param(name)),
        }
    }

    /// Creates an optional parameter (one with a default value in the
    /// signature) with its derived long flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use runfile_core::{ParamSchema, ParamType};
    ///
    /// let param = ParamSchema::optional("count", ParamType::Number);
    /// assert!(!param.required);
    /// assert_eq!(param.usage_token(), "[count]");
    /// ```
    pub fn optional(name: &str, param_type: ParamType) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            required: false,
            rest: false,
            flag: Some(FlagSpec::for_param(name)),
        }
    }

    /// Creates a rest parameter.
    ///
    /// Rest parameters are never required and never bind a flag.
    pub fn rest(name: &str, param_type: ParamType) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            required: false,
            rest: true,
            flag: None,
        }
    }

    /// Sets the short flag form, if this parameter binds a flag.
    pub fn with_short_flag(mut self, short: &str) -> Self {
        if let Some(flag) = self.flag.take() {
            self.flag = Some(flag.with_short(short));
        }
        self
    }

    /// Adds a long flag alias, if this parameter binds a flag.
    pub fn with_flag_alias(mut self, alias: &str) -> Self {
        if let Some(flag) = self.flag.take() {
            self.flag = Some(flag.with_alias(alias));
        }
        self
    }

    /// Renders the usage token for this parameter.
    ///
    /// Required parameters render as `<name>`, optional ones as `[name]`,
    /// and rest parameters as `[name...]`.
    pub fn usage_token(&self) -> String {
        if self.rest {
            format!("[{}...]", self.name)
        } else if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

/// Schema for a single callable task.
///
/// # Examples
///
/// ```
/// use runfile_core::{ParamSchema, ParamType, TaskSchema};
///
/// let task = TaskSchema::new("deploy")
///     .with_description("Push the current build to an environment")
///     .with_param(ParamSchema::required("env", ParamType::String))
///     .with_param(ParamSchema::optional("retries", ParamType::Number));
///
/// assert_eq!(task.name, "deploy");
/// assert!(task.find_param("retries").is_some());
/// assert!(!task.has_rest());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSchema {
    /// Name of the task
    pub name: String,
    /// First descriptive line of the task's doc comment; may be empty
    #[serde(default)]
    pub description: String,
    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<ParamSchema>,
}

impl TaskSchema {
    /// Creates a new task schema with the given name.
    ///
    /// # Examples
    ///
    /// ```
    /// use runfile_core::TaskSchema;
    ///
    /// let task = TaskSchema::new("build");
    /// assert_eq!(task.name, "build");
    /// assert!(task.params.is_empty());
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Adds a parameter.
    pub fn with_param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// Finds a parameter by name.
    pub fn find_param(&self, name: &str) -> Option<&ParamSchema> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Returns `true` if the last parameter is a rest parameter.
    pub fn has_rest(&self) -> bool {
        self.params.last().is_some_and(|p| p.rest)
    }
}

/// A named group of tasks reachable through a qualified target.
///
/// # Examples
///
/// ```
/// use runfile_core::{NamespaceSchema, TaskSchema};
///
/// let ns = NamespaceSchema::new("deploy")
///     .with_task(TaskSchema::new("push"))
///     .with_task(TaskSchema::new("rollback"));
///
/// assert_eq!(ns.tasks.len(), 2);
/// assert!(ns.find_task("push").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceSchema {
    /// Property name the namespace is exposed under
    pub name: String,
    /// Tasks in declaration order
    #[serde(default)]
    pub tasks: Vec<TaskSchema>,
}

impl NamespaceSchema {
    /// Creates a new, empty namespace.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a task.
    pub fn with_task(mut self, task: TaskSchema) -> Self {
        self.tasks.push(task);
        self
    }

    /// Finds a task by name.
    pub fn find_task(&self, name: &str) -> Option<&TaskSchema> {
        self.tasks.iter().find(|t| t.name == name)
    }
}

/// Value carried by a parsed flag token.
///
/// Flags written as `--key=value` or `--key value` carry text; bare switches
/// (`--verbose`, `--no-verbose`) carry a boolean.
///
/// # Examples
///
/// ```
/// use runfile_core::FlagValue;
///
/// assert_eq!(FlagValue::Switch(true).to_text(), "true");
/// assert_eq!(FlagValue::Text("8080".into()).to_text(), "8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Explicit text value.
    Text(String),
    /// Presence (or negation) switch.
    Switch(bool),
}

impl FlagValue {
    /// Returns the textual form of the value.
    ///
    /// Switches render as `"true"` / `"false"` so they can flow through the
    /// same coercion path as text values.
    pub fn to_text(&self) -> String {
        match self {
            FlagValue::Text(text) => text.clone(),
            FlagValue::Switch(true) => "true".to_string(),
            FlagValue::Switch(false) => "false".to_string(),
        }
    }

    /// Returns the switch state, if this value is a switch.
    pub fn as_switch(&self) -> Option<bool> {
        match self {
            FlagValue::Switch(state) => Some(*state),
            FlagValue::Text(_) => None,
        }
    }
}

/// Tokenized command-line arguments for one task invocation.
///
/// Positional tokens keep their original order; flag values are keyed by
/// their dashless name, and a key written twice keeps the last value.
///
/// # Examples
///
/// ```
/// use runfile_core::{FlagValue, ParsedArgv};
///
/// let mut argv = ParsedArgv::new();
/// argv.positional.push("web".to_string());
/// argv.set_flag("env", FlagValue::Text("prod".into()));
/// argv.set_flag("env", FlagValue::Text("staging".into()));
///
/// assert_eq!(argv.flag("env"), Some(&FlagValue::Text("staging".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgv {
    /// Positional tokens, in order of appearance
    pub positional: Vec<String>,
    /// Flag values keyed by dashless flag name
    pub flags: HashMap<String, FlagValue>,
}

impl ParsedArgv {
    /// Creates an empty token set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a flag value, replacing any earlier value for the same key.
    pub fn set_flag(&mut self, key: &str, value: FlagValue) {
        self.flags.insert(key.to_string(), value);
    }

    /// Looks up a flag value by dashless key.
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    /// Returns `true` if no tokens were captured at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.flags.is_empty()
    }
}
