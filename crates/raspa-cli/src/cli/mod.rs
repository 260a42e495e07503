mod commands;
mod helpers;

use clap::Parser;
use raspa_core::domain::RaspaError;

pub fn run_from_env() -> i32 {
    helpers::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_raspa_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            eprintln!("{}", diagnostic.fatal_exit_line());
            diagnostic.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("raspa-prep".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "raspa-prep",
    version,
    about = "Prepare RASPA simulation inputs and staging descriptors"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Validate a job, write simulation.input and the staging descriptor
    Prepare(commands::PrepareArgs),
    /// Validate a job without writing anything
    Check(commands::CheckArgs),
    /// Render a parameters JSON file to RASPA input text
    Render(commands::RenderArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Prepare(args) => commands::run_prepare_command(args),
        CliCommand::Check(args) => commands::run_check_command(args),
        CliCommand::Render(args) => commands::run_render_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(RaspaError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_raspa_error(&self) -> RaspaError {
        match self {
            Self::Usage(message) => {
                RaspaError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => RaspaError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

impl From<RaspaError> for CliError {
    fn from(error: RaspaError) -> Self {
        Self::Compute(error)
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use raspa_core::domain::RaspaErrorCategory;

    #[test]
    fn unknown_subcommand_is_a_usage_error() {
        let error = run(["launch"]).expect_err("unknown subcommand should fail");
        assert!(matches!(error, CliError::Usage(_)));
        let diagnostic = error.as_raspa_error();
        assert_eq!(diagnostic.placeholder(), "INPUT.CLI_USAGE");
        assert_eq!(diagnostic.exit_code(), 2);
    }

    #[test]
    fn help_exits_successfully() {
        assert_eq!(run(["--help"]).expect("help should succeed"), 0);
    }

    #[test]
    fn internal_errors_map_to_io_category() {
        let error = CliError::from(anyhow::anyhow!("disk vanished"));
        let diagnostic = error.as_raspa_error();
        assert_eq!(diagnostic.category(), RaspaErrorCategory::IoSystemError);
        assert_eq!(diagnostic.message(), "disk vanished");
    }
}
