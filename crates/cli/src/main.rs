//! Virtual CPU command-line runner.
//!
//! This binary provides a single entry point for running and inspecting programs. It performs:
//! 1. **Run:** Load a binary, execute it under a step budget, and report the outcome.
//! 2. **Disassemble:** Print a listing of the code region of a binary.
//!
//! Program output goes to stdout; diagnostics, state dumps and statistics go to stderr.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tinycpu_core::config::Config;
use tinycpu_core::core::Cpu;
use tinycpu_core::isa::disasm::disassemble_range;
use tinycpu_core::sim::loader;
use tinycpu_core::soc::StdConsole;
use tinycpu_core::Status;

#[derive(Parser, Debug)]
#[command(
    name = "tinycpu",
    author,
    version,
    about = "Stack-based virtual CPU",
    long_about = "Run or disassemble a program for the virtual CPU.\n\nPrograms are raw little-endian 32-bit words.\n\nExamples:\n  tinycpu run -f prog.bin\n  tinycpu run -f prog.bin --stack 64 --steps 1000 --stats\n  tinycpu disasm -f prog.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it halts, faults, or exhausts the step budget.
    Run {
        /// Program binary to execute.
        #[arg(short, long)]
        file: PathBuf,

        /// Number of stack slots (overrides the config).
        #[arg(long)]
        stack: Option<usize>,

        /// Step budget (overrides the config).
        #[arg(long)]
        steps: Option<u64>,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Log every executed instruction to stderr.
        #[arg(long)]
        trace: bool,

        /// Print execution statistics after the run.
        #[arg(long)]
        stats: bool,
    },

    /// Print a disassembly of a program.
    Disasm {
        /// Program binary to disassemble.
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut filter = EnvFilter::from_default_env();
    if matches!(cli.command, Commands::Run { trace: true, .. }) {
        filter = filter.add_directive(LevelFilter::TRACE.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let code = match cli.command {
        Commands::Run {
            file,
            stack,
            steps,
            config,
            trace,
            stats,
        } => cmd_run(&file, stack, steps, config.as_deref(), trace, stats),
        Commands::Disasm { file } => cmd_disasm(&file),
    };
    process::exit(code);
}

/// Loads and runs a program; returns the process exit code.
fn cmd_run(
    file: &Path,
    stack: Option<usize>,
    steps: Option<u64>,
    config_path: Option<&Path>,
    trace: bool,
    stats: bool,
) -> i32 {
    let mut config = match config_path.map(Config::from_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            error!(error = %e, "could not load configuration");
            return 1;
        }
    };
    if let Some(stack) = stack {
        config.memory.stack_capacity = stack;
    }
    if let Some(steps) = steps {
        config.general.max_steps = steps;
    }
    config.general.trace_instructions |= trace;

    let memory = match loader::load_file(file, &config.memory) {
        Ok(memory) => memory,
        Err(e) => {
            error!(path = %file.display(), error = %e, "could not load program");
            return 1;
        }
    };
    info!(
        path = %file.display(),
        code_words = memory.code_len(),
        stack_capacity = memory.stack_capacity(),
        "program loaded"
    );

    let mut cpu = Cpu::with_console(memory, Box::new(StdConsole::stdio()), &config);
    let executed = cpu.run(config.general.max_steps);

    let mut err = io::stderr().lock();
    let _ = writeln!(err);
    let code = match cpu.status() {
        Status::Halted => {
            let _ = writeln!(err, "[*] Halted after {executed} steps");
            0
        }
        Status::Ok => {
            let _ = writeln!(err, "[*] Step budget of {} exhausted", config.general.max_steps);
            0
        }
        status => {
            let _ = writeln!(err, "[!] FAULT: {status} after {} steps", executed.unsigned_abs());
            let _ = cpu.dump_state(&mut err);
            1
        }
    };
    if stats {
        let _ = cpu.stats().print(&mut err);
    }
    cpu.destroy();
    code
}

/// Prints a listing of the code region; returns the process exit code.
fn cmd_disasm(file: &Path) -> i32 {
    let config = Config::default();
    let memory = match loader::load_file(file, &config.memory) {
        Ok(memory) => memory,
        Err(e) => {
            error!(path = %file.display(), error = %e, "could not load program");
            return 1;
        }
    };
    let listing = disassemble_range(memory.words(), 0, memory.code_len());
    let mut out = io::stdout().lock();
    if out.write_all(listing.as_bytes()).and_then(|()| out.flush()).is_err() {
        return 1;
    }
    0
}
