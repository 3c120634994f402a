//! Paging simulator - text-mode front-end
//!
//! Usage: paging-sim [OPTIONS] [COMMAND]
//!
//! With no command, runs an interactive session reading one logical address
//! per line from stdin until the attempt budget is spent. `replay` translates
//! a file of addresses in one go.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{debug, info};

use paging_sim::error::Result;
use paging_sim::io::{
    format_results, prompt, read_logical_addresses, replay, write_banner, write_frame_table,
    write_page_table, write_result, write_results,
};
use paging_sim::{
    logger, AddressSpaceConfig, AttemptBudget, SimulatorConfig, TranslationEngine, MAX_TRANSLATIONS,
    NUM_FRAMES, NUM_PAGES, PAGE_SIZE,
};

#[derive(Parser)]
#[command(name = "paging-sim")]
#[command(about = "Translate logical addresses through a single-level page table with demand paging")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    geometry: GeometryArgs,

    /// Print diagnostic logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GeometryArgs {
    /// Bytes per page
    #[arg(long, default_value_t = PAGE_SIZE, global = true)]
    page_size: usize,

    /// Number of logical pages
    #[arg(long, default_value_t = NUM_PAGES, global = true)]
    pages: usize,

    /// Number of physical frames
    #[arg(long, default_value_t = NUM_FRAMES, global = true)]
    frames: usize,

    /// Inputs accepted per interactive session
    #[arg(long, default_value_t = MAX_TRANSLATIONS, global = true)]
    max_attempts: usize,
}

impl GeometryArgs {
    fn to_config(&self) -> Result<SimulatorConfig> {
        let address_space = AddressSpaceConfig::new(self.page_size, self.pages, self.frames)?;
        Ok(SimulatorConfig::new(address_space, self.max_attempts)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session on stdin (default)
    Run {
        /// Also dump physical frame occupancy after each translation
        #[arg(long)]
        show_frames: bool,
    },

    /// Translate every address in a file, printing physical addresses (-1 on failure)
    Replay {
        /// File of whitespace-separated logical addresses
        input: PathBuf,

        /// Write results here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result = cli.geometry.to_config().and_then(|config| match cli.command {
        None => run_session(&config, false),
        Some(Commands::Run { show_frames }) => run_session(&config, show_frames),
        Some(Commands::Replay { input, output }) => {
            run_replay(&config.address_space, &input, output.as_deref())
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_session(config: &SimulatorConfig, show_frames: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(config, show_frames, &mut stdin.lock(), &mut stdout.lock())
}

/// Text-mode loop: one submission per input line until the budget runs out
fn session<R: BufRead, W: Write>(
    config: &SimulatorConfig,
    show_frames: bool,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let address_space = &config.address_space;
    let mut budget = AttemptBudget::new(TranslationEngine::new(*address_space), config.max_attempts);

    write_banner(out, address_space, budget.max_attempts())?;

    let mut line = String::new();
    while !budget.is_exhausted() {
        write!(out, "{}", prompt(budget.used() + 1, budget.max_attempts()))?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            info!("input closed with {} attempts remaining", budget.remaining());
            return Ok(());
        }

        let Ok(result) = budget.submit(&line) else {
            break;
        };
        debug!("attempt {}/{}: {:?}", budget.used(), budget.max_attempts(), result);

        write_result(out, &result, address_space)?;
        if result.reached_page_table() {
            write_page_table(out, budget.engine())?;
            if show_frames {
                write_frame_table(out, budget.engine())?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Maximum number of translations reached! Program ending.")?;
    Ok(())
}

fn run_replay(config: &AddressSpaceConfig, input: &Path, output: Option<&Path>) -> Result<()> {
    let tokens = read_logical_addresses(input)?;
    info!("replaying {} addresses from {}", tokens.len(), input.display());

    let mut engine = TranslationEngine::new(*config);
    let results = replay(&mut engine, &tokens);

    let failures = results.iter().filter(|&&r| r < 0).count();
    info!(
        "{} translated, {} failed, {} of {} frames in use",
        results.len() - failures,
        failures,
        engine.frames().occupied_count(),
        config.frame_count()
    );

    match output {
        Some(path) => write_results(path, &results)?,
        None => println!("{}", format_results(&results)),
    }
    Ok(())
}
