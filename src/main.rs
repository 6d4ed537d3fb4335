use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use ghopper::browser::OpenMode;
use ghopper::commands::{self, BranchFlags, Session};
use ghopper::config::ConfigStore;
use ghopper::error::{exit_code_for, EXIT_SUCCESS};
use ghopper::git::LocalRepo;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a repository's GitHub page (alias defaults to the current git remote)
    View {
        /// Alias of the repository
        alias: Option<String>,
    },
    /// Open a PR compare view from a branch into a stored branch role
    Pr {
        /// Alias of the repository; with a single argument this is the branch
        /// key and the alias is inferred from the git remote
        #[arg(value_name = "ALIAS_OR_KEY")]
        first: String,

        /// Branch role to compare against (e.g. prod, dev, pre)
        #[arg(value_name = "BRANCH_KEY")]
        second: Option<String>,

        /// Branch to compare from (defaults to the current branch)
        #[arg(long = "from", value_name = "BRANCH")]
        from: Option<String>,
    },
    /// Add a repository, overwriting an existing alias
    Add {
        alias: String,

        /// GitHub repository URL (defaults to the current git remote)
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        branches: BranchFlags,
    },
    /// Change branch roles of an existing alias
    Modify {
        alias: String,

        #[command(flatten)]
        branches: BranchFlags,
    },
    /// List all configured repos
    List,
    /// Remove a repo from the config
    Remove { alias: String },
}

#[derive(Parser, Debug)]
#[command(name = "ghopper")]
#[command(about = "Open GitHub repos and PRs fast", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ghopper/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print URLs instead of opening the browser
    #[arg(short, long, global = true)]
    print: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let store = ConfigStore::open(cli.config)?;
    log::debug!("Using config at {}", store.path().display());

    let git = LocalRepo::from_cwd();
    let session = Session {
        store,
        git: &git,
        open_mode: if cli.print {
            OpenMode::Print
        } else {
            OpenMode::Browser
        },
        use_colors: ghopper::output::should_use_colors(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::View { alias } => commands::view(&session, alias, &mut out)?,
        Commands::Pr {
            first,
            second,
            from,
        } => commands::pr(&session, first, second, from, &mut out)?,
        Commands::Add {
            alias,
            url,
            branches,
        } => commands::add(&session, alias, url, branches, &mut out)?,
        Commands::Modify { alias, branches } => {
            commands::modify(&session, alias, branches, &mut out)?
        }
        Commands::List => commands::list(&session, &mut out)?,
        Commands::Remove { alias } => commands::remove(&session, alias, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("ghopper: {:#}", e);
        std::process::exit(exit_code_for(&e));
    }

    std::process::exit(EXIT_SUCCESS);
}
