use crate::common::constants::{SETTINGS_ADDITIONAL_RETRIEVE, SETTINGS_CMDLINE};
use crate::domain::{ClassifyResult, Code, ParameterData, RaspaError, StructureData};
use crate::modules::staging::model::{LocalCopy, RetrieveEntry};
use globset::Glob;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Validated inputs of one job, ready for rendering and staging.
#[derive(Debug, Clone, PartialEq)]
pub struct JobInputBundle {
    pub parameters: ParameterData,
    pub structure: Option<StructureData>,
    pub code: Code,
    pub settings: JobSettings,
    pub local_copy_list: Vec<LocalCopy>,
}

/// Directives recognised in the `settings` node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobSettings {
    pub cmdline: Vec<String>,
    pub additional_retrieve_list: Vec<RetrieveEntry>,
}

impl JobSettings {
    /// Extracts the known directives; any other key is rejected in one batch.
    pub fn from_parameter_data(settings: &ParameterData) -> ClassifyResult<Self> {
        let mut remaining = settings.get_dict().clone();

        let cmdline: Vec<String> = take_directive(&mut remaining, SETTINGS_CMDLINE)?;
        let additional_retrieve_list: Vec<RetrieveEntry> =
            take_directive(&mut remaining, SETTINGS_ADDITIONAL_RETRIEVE)?;

        if !remaining.is_empty() {
            let keys = remaining.keys().cloned().collect::<Vec<_>>();
            return Err(RaspaError::input_validation(
                "INPUT.UNRECOGNIZED_SETTINGS",
                format!(
                    "the following keys have been found in the settings input node but were not understood: {}",
                    keys.join(",")
                ),
            ));
        }

        for entry in &additional_retrieve_list {
            validate_retrieve_pattern(entry.pattern())?;
        }

        Ok(Self {
            cmdline,
            additional_retrieve_list,
        })
    }
}

fn take_directive<T>(remaining: &mut Map<String, Value>, key: &str) -> ClassifyResult<T>
where
    T: DeserializeOwned + Default,
{
    match remaining.remove(key) {
        None => Ok(T::default()),
        Some(value) => serde_json::from_value(value).map_err(|source| {
            RaspaError::input_validation(
                "INPUT.SETTINGS_DIRECTIVE",
                format!("settings: invalid '{}' directive: {}", key, source),
            )
        }),
    }
}

fn validate_retrieve_pattern(pattern: &str) -> ClassifyResult<()> {
    if pattern.trim().is_empty() {
        return Err(RaspaError::input_validation(
            "INPUT.RETRIEVE_PATTERN",
            "settings: empty retrieve pattern",
        ));
    }
    Glob::new(pattern).map(|_| ()).map_err(|source| {
        RaspaError::input_validation(
            "INPUT.RETRIEVE_PATTERN",
            format!("settings: invalid retrieve pattern '{}': {}", pattern, source),
        )
    })
}
