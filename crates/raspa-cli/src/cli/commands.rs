use super::CliError;
use super::helpers::{default_calcinfo_path, load_job, load_parameters};
use raspa_core::domain::RaspaError;
use raspa_core::modules::serialization::{encode_json_artifact, write_text_artifact};
use raspa_core::modules::{RaspaCalculation, render_parameters};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(clap::Args)]
pub(super) struct PrepareArgs {
    /// Job description JSON
    #[arg(long)]
    job: PathBuf,

    /// Directory that receives simulation.input
    #[arg(long, default_value = ".")]
    folder: PathBuf,

    /// Staging descriptor output path (defaults to <folder>/calcinfo.json)
    #[arg(long)]
    calcinfo: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct CheckArgs {
    /// Job description JSON
    #[arg(long)]
    job: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct RenderArgs {
    /// Parameters JSON object with GeneralSettings and Component
    #[arg(long)]
    parameters: PathBuf,

    /// Write the rendered input here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(super) fn run_prepare_command(args: PrepareArgs) -> Result<i32, CliError> {
    let job = load_job(&args.job)?;
    let calculation = RaspaCalculation::new(&job.uuid);

    // Everything is validated and encoded before the folder is touched.
    let prepared = calculation.prepare_inputs(job.inputs)?;
    let calcinfo_json =
        encode_json_artifact(&prepared.calcinfo).map_err(|error| error.with_job(&job.uuid))?;
    let calcinfo_path = args
        .calcinfo
        .unwrap_or_else(|| default_calcinfo_path(&args.folder));

    let created_folder = !args.folder.exists();
    fs::create_dir_all(&args.folder).map_err(|source| {
        RaspaError::io_system(
            "IO.CLI_FOLDER",
            format!(
                "failed to create folder '{}': {}",
                args.folder.display(),
                source
            ),
        )
        .with_job(&job.uuid)
    })?;

    let written = calculation
        .write_input(&args.folder, &prepared)
        .and_then(|input_path| {
            fs::write(&calcinfo_path, &calcinfo_json)
                .map(|()| input_path.clone())
                .map_err(|source| {
                    discard_partial_input(&input_path);
                    RaspaError::io_system(
                        "IO.JSON_WRITE",
                        format!("failed to write '{}': {}", calcinfo_path.display(), source),
                    )
                    .with_job(&job.uuid)
                })
        });
    let input_path = match written {
        Ok(input_path) => input_path,
        Err(error) => {
            if created_folder {
                // Only removes the folder when nothing else ended up inside it.
                let _ = fs::remove_dir(&args.folder);
            }
            return Err(error.into());
        }
    };
    info!(
        job = %job.uuid,
        input = %input_path.display(),
        calcinfo = %calcinfo_path.display(),
        files = prepared.calcinfo.local_copy_list.len(),
        "prepared RASPA submission"
    );

    println!("Prepared job '{}': {}", job.uuid, input_path.display());
    println!("Staging descriptor: {}", calcinfo_path.display());
    Ok(0)
}

fn discard_partial_input(input_path: &Path) {
    if let Err(source) = fs::remove_file(input_path) {
        warn!(path = %input_path.display(), %source, "failed to remove partial input file");
    }
}

pub(super) fn run_check_command(args: CheckArgs) -> Result<i32, CliError> {
    let job = load_job(&args.job)?;
    let prepared = RaspaCalculation::new(&job.uuid).prepare_inputs(job.inputs)?;

    println!(
        "Job '{}' is valid: {} input line(s), {} staged file(s), structure {}",
        job.uuid,
        prepared.input_text.lines().count(),
        prepared.calcinfo.local_copy_list.len(),
        if prepared.structure.is_some() {
            "present"
        } else {
            "absent"
        }
    );
    Ok(0)
}

pub(super) fn run_render_command(args: RenderArgs) -> Result<i32, CliError> {
    let parameters = load_parameters(&args.parameters)?;
    let text = render_parameters(&parameters)?;

    match args.output {
        Some(path) => {
            write_text_artifact(&path, &text)?;
            info!(path = %path.display(), "wrote rendered input");
        }
        None => println!("{}", text),
    }
    Ok(0)
}
