use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bosun_core::Summary;
use bosun_runner::{read_raw_log, Validator};

#[derive(Parser)]
#[command(name = "bosun", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize bosun in the current repo (creates .bosun/, config, results dir)
    Init,

    /// Validate the results root and config
    Doctor,

    /// Remove prior result logs and evidence artifacts
    Clean,

    /// Run the gatekeeper pass over a raw results log and print the summary
    Validate {
        /// Raw results log (defaults to the configured path)
        #[arg(long)]
        log: Option<PathBuf>,
        /// Validated output log (defaults to the configured path)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Re-print the summary for an already validated log
    Report {
        #[arg(long)]
        validated: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let repo_root = std::env::current_dir()?;

    match cli.cmd {
        Command::Init => {
            Validator::init_repo(&repo_root)?;
            println!("Initialized bosun in {}", repo_root.display());
        }
        Command::Doctor => {
            let v = Validator::open(repo_root)?;
            v.doctor()?;
            println!("OK");
        }
        Command::Clean => {
            let v = Validator::open(repo_root)?;
            v.clean()?;
            println!("Cleared prior result files");
        }
        Command::Validate { log, out } => {
            let v = Validator::open(repo_root)?;
            v.doctor()?;
            let run = v.run(log.as_deref(), out.as_deref())?;
            print!("{}", run.summary.render());
            println!("validated log: {}", run.validated_log.display());
            // Failing cases do not fail the process; the summary above is
            // the authority.
        }
        Command::Report { validated } => {
            let v = Validator::open(repo_root.clone())?;
            let path = validated.unwrap_or_else(|| v.cfg.validated_log_path(&repo_root));
            let records = read_raw_log(&path)?;
            print!("{}", Summary::from_records(&records).render());
        }
    }

    Ok(())
}
