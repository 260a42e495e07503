//! Submission preparation for a RASPA job.
//!
//! [`RaspaCalculation::prepare_inputs`] runs every check and renders the input
//! text in memory; [`SubmissionPlugin::prepare_for_submission`] additionally
//! writes `simulation.input` once all checks have passed.

pub mod model;

pub use model::{CalcInfo, CodeInfo, LocalCopy, RemoteCopy, RetrieveEntry};

use crate::common::constants::{DEFAULT_PARSER_NAME, INPUT_FILE_NAME};
use crate::domain::{InputMap, PrepareResult, StructureData};
use crate::modules::classifier::{JobInputBundle, classify_inputs};
use crate::modules::render::RaspaInput;
use crate::modules::serialization::write_text_artifact;
use crate::modules::traits::{InputRenderer, SubmissionPlugin};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedJob {
    pub input_text: String,
    pub structure: Option<StructureData>,
    pub calcinfo: CalcInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaspaCalculation {
    uuid: String,
}

impl RaspaCalculation {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn prepare_inputs(&self, inputs: InputMap) -> PrepareResult<PreparedJob> {
        let bundle = classify_inputs(inputs).map_err(|error| error.with_job(&self.uuid))?;
        let input = RaspaInput::from_parameters(&bundle.parameters)
            .map_err(|error| error.with_job(&self.uuid))?;
        let input_text = input.render();
        debug!(
            job = %self.uuid,
            components = input.tree().components.len(),
            lines = input_text.lines().count(),
            "rendered simulation input"
        );

        let structure = bundle.structure.clone();
        let calcinfo = self.build_calcinfo(bundle);
        Ok(PreparedJob {
            input_text,
            structure,
            calcinfo,
        })
    }

    /// Writes the rendered text of `prepared` to `folder/simulation.input`.
    pub fn write_input(&self, folder: &Path, prepared: &PreparedJob) -> PrepareResult<PathBuf> {
        let input_path = folder.join(INPUT_FILE_NAME);
        write_text_artifact(&input_path, &format!("{}\n", prepared.input_text))
            .map_err(|error| error.with_job(&self.uuid))?;
        Ok(input_path)
    }

    fn build_calcinfo(&self, bundle: JobInputBundle) -> CalcInfo {
        let JobInputBundle {
            code,
            settings,
            local_copy_list,
            ..
        } = bundle;

        let mut cmdline_params = settings.cmdline;
        cmdline_params.push(INPUT_FILE_NAME.to_string());

        let mut retrieve_list = vec![RetrieveEntry::default_output()];
        retrieve_list.extend(settings.additional_retrieve_list);

        CalcInfo {
            uuid: self.uuid.clone(),
            stdin_name: INPUT_FILE_NAME.to_string(),
            cmdline_params: cmdline_params.clone(),
            codes_info: vec![CodeInfo {
                code_uuid: code.uuid,
                cmdline_params,
            }],
            local_copy_list,
            remote_copy_list: Vec::new(),
            remote_symlink_list: Vec::new(),
            retrieve_list,
            parser_name: DEFAULT_PARSER_NAME.to_string(),
        }
    }
}

impl SubmissionPlugin for RaspaCalculation {
    fn input_file_name(&self) -> &'static str {
        INPUT_FILE_NAME
    }

    fn prepare_for_submission(&self, folder: &Path, inputs: InputMap) -> PrepareResult<CalcInfo> {
        let prepared = self.prepare_inputs(inputs)?;
        let input_path = self.write_input(folder, &prepared)?;
        info!(
            job = %self.uuid,
            path = %input_path.display(),
            files = prepared.calcinfo.local_copy_list.len(),
            "prepared RASPA submission"
        );
        Ok(prepared.calcinfo)
    }
}
