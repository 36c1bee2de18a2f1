//! Use-case document loading
//!
//! Documents are parsed into a `serde_yaml::Value` tree first and then
//! resolved into the typed model in one pass, so that every consumer sees
//! [`Step`] variants rather than raw mappings.
//!
//! Expected shape:
//!
//! ```yaml
//! Actors: [Buyer, Seller]
//! Regex: "UC01"
//! Scenario:
//!   - Buyer: Places order
//!   - Alternatives:
//!       - Description: Item out of stock
//!         Goto: "1"
//!         Actions:
//!           - Seller: Suggests substitute
//!   - Seller: Confirms order
//! ```

use crate::error::LoadError;
use crate::scenario::{use_case_name, Action, Branch, BranchKind, Step, UseCase};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Top-level key holding the actor list
pub const ACTORS_KEY: &str = "Actors";
/// Top-level key holding the step sequence
pub const SCENARIO_KEY: &str = "Scenario";
/// Optional top-level key holding the LaTeX anchor pattern
pub const REGEX_KEY: &str = "Regex";

const DESCRIPTION_KEY: &str = "Description";
const GOTO_KEY: &str = "Goto";
const ACTIONS_KEY: &str = "Actions";

/// Parser trait for turning document text into a [`UseCase`]
pub trait DocumentParser {
    /// Parse `content`; `name` identifies the use case in errors and output
    fn parse(&self, name: &str, content: &str) -> Result<UseCase, LoadError>;

    /// Supported file extensions (without dot)
    fn extensions(&self) -> &[&str];

    /// Check if this parser can handle the given path
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}

/// YAML use-case parser
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Create new YAML parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for YamlParser {
    fn parse(&self, name: &str, content: &str) -> Result<UseCase, LoadError> {
        // Only the first document of a multi-document stream is used
        let root = match serde_yaml::Deserializer::from_str(content).next() {
            Some(doc) => Value::deserialize(doc).map_err(|e| LoadError::Syntax {
                use_case: name.to_string(),
                message: e.to_string(),
            })?,
            None => Value::Null,
        };

        Resolver { use_case: name }.resolve(root)
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Load the use case stored at `path` with the given parser
///
/// The use-case name is the file name up to its first `.`.
///
/// # Errors
/// - `LoadError::Io` if the file cannot be read
/// - any structural error reported by the parser
pub fn load_with<P: DocumentParser>(parser: &P, path: &Path) -> Result<UseCase, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = use_case_name(&file_name);

    tracing::debug!("Parsing use case '{}' from {}", name, path.display());
    parser.parse(name, &content)
}

/// Load a YAML use case from `path`
///
/// # Errors
/// See [`load_with`].
pub fn load_use_case(path: impl AsRef<Path>) -> Result<UseCase, LoadError> {
    load_with(&YamlParser, path.as_ref())
}

/// Resolves a raw value tree into the model, carrying the use-case name for errors
struct Resolver<'a> {
    use_case: &'a str,
}

impl Resolver<'_> {
    fn resolve(&self, root: Value) -> Result<UseCase, LoadError> {
        let root = match root {
            Value::Null => {
                return Err(LoadError::Empty {
                    use_case: self.use_case.to_string(),
                })
            }
            Value::Mapping(map) => map,
            _ => return Err(self.shape("document root", "must be a mapping")),
        };

        let actors = match self.required(&root, ACTORS_KEY)? {
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    scalar_text(item).ok_or_else(|| {
                        self.shape(format!("{ACTORS_KEY}[{}]", i + 1), "must be a scalar name")
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(self.shape(ACTORS_KEY, "must be a sequence of names")),
        };

        let steps = match self.required(&root, SCENARIO_KEY)? {
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.step(i + 1, item, &actors))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(self.shape(SCENARIO_KEY, "must be a sequence of steps")),
        };

        let anchor = match root.get(REGEX_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(pattern)) => Some(pattern.clone()),
            Some(_) => return Err(self.shape(REGEX_KEY, "must be a string")),
        };

        Ok(UseCase {
            name: self.use_case.to_string(),
            actors,
            steps,
            anchor,
        })
    }

    /// Declared actors take precedence over the branch keywords
    fn step(&self, number: usize, value: &Value, actors: &[String]) -> Result<Step, LoadError> {
        let location = format!("{SCENARIO_KEY} step {number}");
        let (key, value) = self.single_entry(&location, value)?;

        let kind = match BranchKind::from_key(&key) {
            Some(kind) if !actors.contains(&key) => kind,
            _ => {
                let text = scalar_text(value)
                    .ok_or_else(|| self.shape(&location, "action must be a scalar"))?;
                return Ok(Step::Primary(Action::new(key, text)));
            }
        };

        let Value::Sequence(items) = value else {
            return Err(self.shape(
                format!("{location} ({kind})"),
                "must be a sequence of branches",
            ));
        };

        let branches = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.branch(&format!("{location}, {kind} entry {}", i + 1), item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Step::Branches { kind, branches })
    }

    fn branch(&self, location: &str, value: &Value) -> Result<Branch, LoadError> {
        let Value::Mapping(map) = value else {
            return Err(self.shape(location, "must be a mapping"));
        };

        let field = |key: &str| -> Result<String, LoadError> {
            let path = format!("{location}.{key}");
            let value = map
                .get(key)
                .ok_or_else(|| LoadError::missing_key(self.use_case, path.clone()))?;
            scalar_text(value).ok_or_else(|| self.shape(path, "must be a scalar"))
        };

        let description = field(DESCRIPTION_KEY)?;
        let goto = field(GOTO_KEY)?;

        let actions = match map.get(ACTIONS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let action_location = format!("{location}, action {}", i + 1);
                    let (actor, text) = self.single_entry(&action_location, item)?;
                    let text = scalar_text(text)
                        .ok_or_else(|| self.shape(&action_location, "action must be a scalar"))?;
                    Ok(Action::new(actor, text))
                })
                .collect::<Result<Vec<_>, LoadError>>()?,
            Some(_) => {
                return Err(self.shape(format!("{location}.{ACTIONS_KEY}"), "must be a sequence"))
            }
        };

        Ok(Branch {
            description,
            goto,
            actions,
        })
    }

    /// Unpack a mapping that must hold exactly one `key: value` entry
    fn single_entry<'v>(
        &self,
        location: &str,
        value: &'v Value,
    ) -> Result<(String, &'v Value), LoadError> {
        let Value::Mapping(map) = value else {
            return Err(self.shape(location, "must be a mapping"));
        };

        let mut entries = map.iter();
        match (entries.next(), entries.next()) {
            (Some((key, value)), None) => {
                let key = scalar_text(key)
                    .ok_or_else(|| self.shape(location, "key must be a scalar"))?;
                Ok((key, value))
            }
            _ => Err(LoadError::AmbiguousStep {
                use_case: self.use_case.to_string(),
                location: location.to_string(),
                entries: map.len(),
            }),
        }
    }

    fn required<'m>(&self, map: &'m Mapping, key: &str) -> Result<&'m Value, LoadError> {
        map.get(key)
            .ok_or_else(|| LoadError::missing_key(self.use_case, key))
    }

    fn shape(&self, location: impl Into<String>, expected: impl Into<String>) -> LoadError {
        LoadError::invalid_shape(self.use_case, location, expected)
    }
}

/// Text of a scalar value; `None` for sequences, mappings and tagged values
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
