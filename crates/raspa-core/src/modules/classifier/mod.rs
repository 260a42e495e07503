//! Sorts the input nodes of a job by role and validates the combination.
//!
//! Roles are looked up by link name, so their order in the [`InputMap`] does not
//! matter. Single-file nodes under any other link become staged files, in the
//! order they appear in the map.

pub mod model;

pub use model::{JobInputBundle, JobSettings};

use crate::common::constants::{CODE_LINK, PARAMETERS_LINK, SETTINGS_LINK, STRUCTURE_LINK};
use crate::domain::{ClassifyResult, InputMap, InputNode, ParameterData, RaspaError};
use crate::modules::staging::model::LocalCopy;
use tracing::debug;

pub fn classify_inputs(mut inputs: InputMap) -> ClassifyResult<JobInputBundle> {
    let parameters = match inputs.remove(PARAMETERS_LINK) {
        None => {
            return Err(RaspaError::input_validation(
                "INPUT.MISSING_PARAMETERS",
                "no parameters specified",
            ));
        }
        Some(InputNode::Parameters(data)) => data,
        Some(other) => return Err(unexpected_type(PARAMETERS_LINK, &other)),
    };

    let structure = match inputs.remove(STRUCTURE_LINK) {
        None => None,
        Some(InputNode::Structure(structure)) => Some(structure),
        Some(other) => return Err(unexpected_type(STRUCTURE_LINK, &other)),
    };

    let code = match inputs.remove(CODE_LINK) {
        None => {
            return Err(RaspaError::input_validation(
                "INPUT.MISSING_CODE",
                "no code specified",
            ));
        }
        Some(InputNode::Code(code)) => code,
        Some(other) => return Err(unexpected_type(CODE_LINK, &other)),
    };

    let settings_data = match inputs.remove(SETTINGS_LINK) {
        None => ParameterData::default(),
        Some(InputNode::Parameters(data)) => data,
        Some(other) => return Err(unexpected_type(SETTINGS_LINK, &other)),
    };

    let mut local_copy_list = Vec::new();
    let mut unrecognized = Vec::new();
    for (link, node) in inputs {
        match node {
            InputNode::Singlefile(file) => {
                debug!(link = %link, filename = file.filename(), "staging auxiliary file");
                local_copy_list.push(LocalCopy::new(
                    file.file_abs_path(),
                    file.filename(),
                ));
            }
            _ => unrecognized.push(link),
        }
    }

    if !unrecognized.is_empty() {
        return Err(RaspaError::input_validation(
            "INPUT.UNRECOGNIZED_NODES",
            format!("unrecognized input nodes: {}", unrecognized.join(",")),
        ));
    }

    let settings = JobSettings::from_parameter_data(&settings_data)?;

    debug!(
        structure = structure.is_some(),
        files = local_copy_list.len(),
        cmdline_tokens = settings.cmdline.len(),
        "classified job inputs"
    );

    Ok(JobInputBundle {
        parameters,
        structure,
        code,
        settings,
        local_copy_list,
    })
}

fn unexpected_type(link: &str, node: &InputNode) -> RaspaError {
    let placeholder = match link {
        PARAMETERS_LINK => "INPUT.PARAMETERS_TYPE",
        STRUCTURE_LINK => "INPUT.STRUCTURE_TYPE",
        SETTINGS_LINK => "INPUT.SETTINGS_TYPE",
        _ => "INPUT.CODE_TYPE",
    };
    RaspaError::input_validation(
        placeholder,
        format!("{}: unexpected type {}", link, node.kind()),
    )
}
