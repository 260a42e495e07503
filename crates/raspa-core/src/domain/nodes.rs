//! Input artifacts handed to a calculation by the workflow engine.
//!
//! Only the parts that preparation looks at are modelled: the dictionary behind
//! a parameter node, the location of a single file, and the identifiers of the
//! structure and code nodes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Mapping-typed node, used for both `parameters` and `settings`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterData {
    #[serde(default)]
    dict: Map<String, Value>,
}

impl ParameterData {
    pub fn new(dict: Map<String, Value>) -> Self {
        Self { dict }
    }

    /// Returns `None` unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(dict) => Some(Self { dict }),
            _ => None,
        }
    }

    pub fn get_dict(&self) -> &Map<String, Value> {
        &self.dict
    }

    pub fn into_dict(self) -> Map<String, Value> {
        self.dict
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureData {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl StructureData {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinglefileData {
    path: PathBuf,
    filename: String,
}

impl SinglefileData {
    pub fn new(path: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
        }
    }

    /// Uses the last path component as the declared filename.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, filename }
    }

    pub fn file_abs_path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Joins a relative path onto `base`; absolute paths are left alone.
    pub fn resolve_against(&mut self, base: &Path) {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Code {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputNode {
    Parameters(ParameterData),
    Structure(StructureData),
    Singlefile(SinglefileData),
    Code(Code),
    Text { value: String },
}

impl InputNode {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Parameters(_) => "ParameterData",
            Self::Structure(_) => "StructureData",
            Self::Singlefile(_) => "SinglefileData",
            Self::Code(_) => "Code",
            Self::Text { .. } => "Text",
        }
    }
}

impl From<ParameterData> for InputNode {
    fn from(value: ParameterData) -> Self {
        Self::Parameters(value)
    }
}

impl From<StructureData> for InputNode {
    fn from(value: StructureData) -> Self {
        Self::Structure(value)
    }
}

impl From<SinglefileData> for InputNode {
    fn from(value: SinglefileData) -> Self {
        Self::Singlefile(value)
    }
}

impl From<Code> for InputNode {
    fn from(value: Code) -> Self {
        Self::Code(value)
    }
}

/// Link name to node, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputMap {
    entries: Vec<(String, InputNode)>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces an existing link in place, keeping its position.
    pub fn insert(&mut self, link: impl Into<String>, node: impl Into<InputNode>) {
        let link = link.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(name, _)| *name == link) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((link, node)),
        }
    }

    pub fn with(mut self, link: impl Into<String>, node: impl Into<InputNode>) -> Self {
        self.insert(link, node);
        self
    }

    pub fn remove(&mut self, link: &str) -> Option<InputNode> {
        let index = self.entries.iter().position(|(name, _)| name == link)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, link: &str) -> Option<&InputNode> {
        self.entries
            .iter()
            .find(|(name, _)| name == link)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, link: &str) -> bool {
        self.get(link).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }
}

impl IntoIterator for InputMap {
    type Item = (String, InputNode);
    type IntoIter = std::vec::IntoIter<(String, InputNode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, N> FromIterator<(K, N)> for InputMap
where
    K: Into<String>,
    N: Into<InputNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (link, node) in iter {
            map.insert(link, node);
        }
        map
    }
}
