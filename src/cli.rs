use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::archive::paths::PathOverrides;
use crate::commands::{self, CommandReport};

#[derive(Debug, Parser)]
#[command(
    name = "archive-index",
    version,
    about = "Scan a summary archive directory and render its index.html",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Print the command report as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Used when no command is given: `archive-index --archive-dir X` is `generate`.
    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rebuild the index page (the default when no command is given).
    Generate(GenerateArgs),
    /// Show resolved paths, naming convention and active overrides.
    Status(PathArgs),
}

#[derive(Debug, Clone, Default, Args)]
struct PathArgs {
    /// Directory holding the archive pages.
    #[arg(long, value_name = "DIR")]
    archive_dir: Option<PathBuf>,

    /// File name of the generated page inside the archive directory.
    #[arg(long, value_name = "NAME")]
    output: Option<String>,
}

impl From<PathArgs> for PathOverrides {
    fn from(args: PathArgs) -> Self {
        Self {
            archive_dir: args.archive_dir,
            output_name: args.output,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
struct GenerateArgs {
    #[command(flatten)]
    paths: PathArgs,

    /// Build and report the index without writing the page.
    #[arg(long)]
    dry_run: bool,
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

pub fn run(dotenv_file: Option<PathBuf>) -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Generate(cli.generate));

    let report = match command {
        Command::Generate(args) => {
            if !cli.json {
                println!("generating archive index...");
            }
            commands::generate::run(&commands::generate::GenerateOptions {
                overrides: args.paths.into(),
                dry_run: args.dry_run,
            })?
        }
        Command::Status(args) => commands::status::run(&args.into(), dotenv_file.as_deref())?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!("{} reported {} issue(s)", report.command, report.issues.len());
    }
    Ok(())
}
