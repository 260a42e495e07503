use super::CliError;
use anyhow::Context;
use raspa_core::common::constants::CODE_LINK;
use raspa_core::domain::{Code, InputMap, InputNode, ParameterData, RaspaError, RaspaResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub(super) const CALCINFO_FILE_NAME: &str = "calcinfo.json";

/// Job description file read by `prepare` and `check`.
#[derive(Debug, Deserialize)]
pub(super) struct JobDescription {
    #[serde(default)]
    pub(super) uuid: Option<String>,
    #[serde(default)]
    pub(super) code: Option<Code>,
    #[serde(default)]
    pub(super) inputs: Vec<LinkedInput>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LinkedInput {
    pub(super) link: String,
    #[serde(flatten)]
    pub(super) node: InputNode,
}

#[derive(Debug)]
pub(super) struct LoadedJob {
    pub(super) uuid: String,
    pub(super) inputs: InputMap,
}

pub(super) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(super) fn load_job(path: &Path) -> Result<LoadedJob, CliError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read job description '{}'", path.display()))?;
    let description = serde_json::from_str::<JobDescription>(&content).map_err(|source| {
        CliError::Compute(RaspaError::input_validation(
            "INPUT.JOB_DESCRIPTION",
            format!("failed to parse job description '{}': {}", path.display(), source),
        ))
    })?;

    let base_dir = job_base_dir(path).map_err(CliError::Compute)?;
    let uuid = description
        .uuid
        .clone()
        .unwrap_or_else(|| default_job_uuid(path));
    let inputs = collect_inputs(description, &base_dir)
        .map_err(|error| CliError::Compute(error.with_job(&uuid)))?;

    Ok(LoadedJob { uuid, inputs })
}

pub(super) fn load_parameters(path: &Path) -> Result<ParameterData, CliError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read parameters '{}'", path.display()))?;
    let value = serde_json::from_str::<serde_json::Value>(&content).map_err(|source| {
        CliError::Compute(RaspaError::input_validation(
            "INPUT.PARAMETERS_JSON",
            format!("failed to parse parameters '{}': {}", path.display(), source),
        ))
    })?;
    ParameterData::from_value(value).ok_or_else(|| {
        CliError::Compute(RaspaError::input_validation(
            "INPUT.PARAMETERS_TYPE",
            format!("parameters: '{}' does not hold a JSON object", path.display()),
        ))
    })
}

pub(super) fn default_calcinfo_path(folder: &Path) -> PathBuf {
    folder.join(CALCINFO_FILE_NAME)
}

fn collect_inputs(description: JobDescription, base_dir: &Path) -> RaspaResult<InputMap> {
    let mut inputs = InputMap::new();
    if let Some(code) = description.code {
        inputs.insert(CODE_LINK, code);
    }

    for LinkedInput { link, mut node } in description.inputs {
        if inputs.contains(&link) {
            return Err(RaspaError::input_validation(
                "INPUT.JOB_DUPLICATE_LINK",
                format!("input link '{}' is specified more than once", link),
            ));
        }
        if let InputNode::Singlefile(file) = &mut node {
            file.resolve_against(base_dir);
        }
        inputs.insert(link, node);
    }

    Ok(inputs)
}

fn job_base_dir(path: &Path) -> RaspaResult<PathBuf> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::path::absolute(parent).map_err(|source| {
        RaspaError::io_system(
            "IO.CLI_JOB_DIR",
            format!(
                "failed to resolve directory of job description '{}': {}",
                path.display(),
                source
            ),
        )
    })
}

fn default_job_uuid(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "raspa-job".to_string())
}

#[cfg(test)]
mod tests {
    use super::{JobDescription, collect_inputs, default_job_uuid};
    use raspa_core::domain::InputNode;
    use serde_json::json;
    use std::path::Path;

    fn description(value: serde_json::Value) -> JobDescription {
        serde_json::from_value(value).expect("job description should deserialize")
    }

    #[test]
    fn job_description_keeps_link_order_and_resolves_files() {
        let job = description(json!({
            "code": { "uuid": "raspa" },
            "inputs": [
                { "link": "parameters", "type": "parameters", "dict": { "GeneralSettings": {} } },
                { "link": "block", "type": "singlefile", "path": "files/LTA.block", "filename": "LTA.block" },
                { "link": "pseudo", "type": "singlefile", "path": "/abs/pseudo_atoms.def", "filename": "pseudo_atoms.def" }
            ]
        }));

        let inputs = collect_inputs(job, Path::new("/jobs/run1")).expect("inputs should load");
        assert_eq!(
            inputs.names().collect::<Vec<_>>(),
            vec!["code", "parameters", "block", "pseudo"]
        );

        let Some(InputNode::Singlefile(block)) = inputs.get("block") else {
            panic!("block should be a single file");
        };
        assert_eq!(block.file_abs_path(), Path::new("/jobs/run1/files/LTA.block"));
        let Some(InputNode::Singlefile(pseudo)) = inputs.get("pseudo") else {
            panic!("pseudo should be a single file");
        };
        assert_eq!(pseudo.file_abs_path(), Path::new("/abs/pseudo_atoms.def"));
    }

    #[test]
    fn duplicate_links_are_rejected() {
        let job = description(json!({
            "code": { "uuid": "raspa" },
            "inputs": [{ "link": "code", "type": "code", "uuid": "other" }]
        }));

        let error = collect_inputs(job, Path::new("/jobs")).expect_err("duplicate should fail");
        assert_eq!(error.placeholder(), "INPUT.JOB_DUPLICATE_LINK");
    }

    #[test]
    fn job_uuid_defaults_to_file_stem() {
        assert_eq!(default_job_uuid(Path::new("/jobs/co2-lta.json")), "co2-lta");
    }
}
