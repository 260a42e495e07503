//! Typed parameter tree for a RASPA simulation input.
//!
//! The tree is built once from the `parameters` dictionary and never mutated by
//! rendering. Sections keep their keys in a `BTreeMap`, so iteration is always
//! lexicographic no matter how the dictionary was assembled.

use super::errors::RaspaError;
use super::nodes::ParameterData;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub const GENERAL_SETTINGS_KEY: &str = "GeneralSettings";
pub const COMPONENT_KEY: &str = "Component";
pub const HEADER_TAG_KEY: &str = "_";
pub const MOLECULE_NAME_KEY: &str = "MoleculeName";

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Unsigned(value) => write!(f, "{}", value),
            // Debug keeps a fractional part on integral values (298.0, not 298).
            Self::Float(value) => write!(f, "{:?}", value),
            Self::Bool(true) => f.write_str(".true."),
            Self::Bool(false) => f.write_str(".false."),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Scalar(Scalar),
    Block(Block),
    Repeated(Vec<ParameterValue>),
}

macro_rules! scalar_parameter_from {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for ParameterValue {
                fn from(value: $source) -> Self {
                    Self::Scalar(value.into())
                }
            }
        )+
    };
}

scalar_parameter_from!(Scalar, i64, u64, f64, bool, &str, String);

impl From<Block> for ParameterValue {
    fn from(value: Block) -> Self {
        Self::Block(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    entries: BTreeMap<String, ParameterValue>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Option<ParameterValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Reserved `_` and `MoleculeName` keys of a nested block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionHeader {
    pub tag: Option<Scalar>,
    pub molecule_name: Option<Scalar>,
}

impl SectionHeader {
    pub fn new(tag: Option<Scalar>, molecule_name: Option<Scalar>) -> Self {
        Self { tag, molecule_name }
    }

    pub fn molecule(name: impl Into<Scalar>) -> Self {
        Self {
            tag: None,
            molecule_name: Some(name.into()),
        }
    }

    /// `KEY <tag> MoleculeName <name>`, with absent fields rendered empty.
    pub fn line(&self, key: &str) -> String {
        format!(
            "{} {} {} {}",
            key,
            display_or_empty(self.tag.as_ref()),
            MOLECULE_NAME_KEY,
            display_or_empty(self.molecule_name.as_ref())
        )
    }
}

fn display_or_empty(scalar: Option<&Scalar>) -> String {
    scalar.map(ToString::to_string).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub header: SectionHeader,
    pub body: Section,
}

impl Block {
    pub fn new(header: SectionHeader, body: Section) -> Self {
        Self { header, body }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterTree {
    pub general_settings: Section,
    pub components: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterTreeError {
    #[error("parameters: missing mandatory section '{0}'")]
    MissingSection(&'static str),
    #[error("parameters: section '{0}' must be a mapping")]
    NotASection(&'static str),
    #[error("parameters: '{0}' must be a mapping or a list of mappings")]
    InvalidComponent(String),
    #[error("parameters: '{0}' has a null value")]
    NullValue(String),
    #[error("parameters: reserved key '{0}' must hold a scalar")]
    NonScalarHeader(String),
    #[error("unrecognized parameter sections: {}", .0.join(","))]
    UnrecognizedSections(Vec<String>),
}

impl From<ParameterTreeError> for RaspaError {
    fn from(error: ParameterTreeError) -> Self {
        RaspaError::input_validation("INPUT.PARAMETER_TREE", error.to_string())
    }
}

impl ParameterTree {
    pub fn new(general_settings: Section, components: Vec<Block>) -> Self {
        Self {
            general_settings,
            components,
        }
    }

    pub fn from_parameters(data: &ParameterData) -> Result<Self, ParameterTreeError> {
        Self::from_dict(data.get_dict())
    }

    /// Builds the tree from a `parameters` dictionary without consuming it.
    ///
    /// `GeneralSettings` is kept bare; `_` and `MoleculeName` are lifted into a
    /// [`SectionHeader`] only for nested blocks. A single `Component` mapping is
    /// treated as a one-element list.
    pub fn from_dict(dict: &Map<String, Value>) -> Result<Self, ParameterTreeError> {
        let general = dict
            .get(GENERAL_SETTINGS_KEY)
            .ok_or(ParameterTreeError::MissingSection(GENERAL_SETTINGS_KEY))?;
        let Value::Object(general) = general else {
            return Err(ParameterTreeError::NotASection(GENERAL_SETTINGS_KEY));
        };
        let general_settings = section_from_map(general, GENERAL_SETTINGS_KEY)?;

        let components = match dict
            .get(COMPONENT_KEY)
            .ok_or(ParameterTreeError::MissingSection(COMPONENT_KEY))?
        {
            Value::Object(map) => vec![block_from_map(map, COMPONENT_KEY)?],
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let path = format!("{}[{}]", COMPONENT_KEY, index);
                    match item {
                        Value::Object(map) => block_from_map(map, &path),
                        _ => Err(ParameterTreeError::InvalidComponent(path)),
                    }
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => {
                return Err(ParameterTreeError::InvalidComponent(
                    COMPONENT_KEY.to_string(),
                ));
            }
        };

        let unrecognized = dict
            .keys()
            .filter(|key| *key != GENERAL_SETTINGS_KEY && *key != COMPONENT_KEY)
            .cloned()
            .collect::<Vec<_>>();
        if !unrecognized.is_empty() {
            return Err(ParameterTreeError::UnrecognizedSections(unrecognized));
        }

        Ok(Self {
            general_settings,
            components,
        })
    }
}

fn section_from_map(map: &Map<String, Value>, path: &str) -> Result<Section, ParameterTreeError> {
    let mut section = Section::new();
    for (key, value) in map {
        section.insert(key.clone(), value_from_json(value, &child_path(path, key))?);
    }
    Ok(section)
}

fn block_from_map(map: &Map<String, Value>, path: &str) -> Result<Block, ParameterTreeError> {
    let mut block = Block::default();
    for (key, value) in map {
        let key_path = child_path(path, key);
        match key.as_str() {
            HEADER_TAG_KEY => block.header.tag = Some(header_scalar(value, key_path)?),
            MOLECULE_NAME_KEY => {
                block.header.molecule_name = Some(header_scalar(value, key_path)?)
            }
            _ => {
                block
                    .body
                    .insert(key.clone(), value_from_json(value, &key_path)?);
            }
        }
    }
    Ok(block)
}

fn value_from_json(value: &Value, path: &str) -> Result<ParameterValue, ParameterTreeError> {
    match value {
        Value::Null => Err(ParameterTreeError::NullValue(path.to_string())),
        Value::Bool(flag) => Ok(ParameterValue::Scalar(Scalar::Bool(*flag))),
        Value::Number(number) => Ok(ParameterValue::Scalar(scalar_from_number(number))),
        Value::String(text) => Ok(ParameterValue::Scalar(Scalar::Text(text.clone()))),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| value_from_json(item, &format!("{}[{}]", path, index)))
            .collect::<Result<Vec<_>, _>>()
            .map(ParameterValue::Repeated),
        Value::Object(map) => block_from_map(map, path).map(ParameterValue::Block),
    }
}

fn header_scalar(value: &Value, path: String) -> Result<Scalar, ParameterTreeError> {
    match value_from_json(value, &path)? {
        ParameterValue::Scalar(scalar) => Ok(scalar),
        _ => Err(ParameterTreeError::NonScalarHeader(path)),
    }
}

fn scalar_from_number(number: &Number) -> Scalar {
    number
        .as_i64()
        .map(Scalar::Integer)
        .or_else(|| number.as_u64().map(Scalar::Unsigned))
        .or_else(|| number.as_f64().map(Scalar::Float))
        .unwrap_or_else(|| Scalar::Text(number.to_string()))
}

fn child_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}
