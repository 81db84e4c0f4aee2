//! Branch predictor simulator frontend.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use bpsim::{SchemeConfig, Simulator, Trace};

#[derive(Parser)]
#[command(name = "sim", about = "Trace-driven branch predictor simulator")]
struct Args {
    /// After the report, list the N most executed branches with their
    /// per-branch hit rates.
    #[arg(long, value_name = "N", global = true)]
    profile: Option<usize>,

    #[command(subcommand)]
    scheme: Scheme,
}

#[derive(Subcommand)]
enum Scheme {
    /// Bimodal predictor indexed by M2 program-counter bits.
    Bimodal { m2: usize, trace_file: PathBuf },

    /// Gshare predictor with an M1-bit index folding N history bits.
    Gshare {
        m1: usize,
        n: usize,
        trace_file: PathBuf,
    },

    /// Tournament of gshare and bimodal arbitrated by a K-bit chooser.
    Hybrid {
        k: usize,
        m1: usize,
        n: usize,
        m2: usize,
        trace_file: PathBuf,
    },
}

impl Scheme {
    fn config(&self) -> SchemeConfig {
        match *self {
            Self::Bimodal { m2, .. } => SchemeConfig::Bimodal { m2 },
            Self::Gshare { m1, n, .. } => SchemeConfig::Gshare { m1, n },
            Self::Hybrid { k, m1, n, m2, .. } => SchemeConfig::Hybrid { k, m1, n, m2 },
        }
    }

    fn trace_file(&self) -> &PathBuf {
        match self {
            Self::Bimodal { trace_file, .. }
            | Self::Gshare { trace_file, .. }
            | Self::Hybrid { trace_file, .. } => trace_file,
        }
    }

    /// The command echoed at the top of the report, in the scheme's
    /// argument order.
    fn command_line(&self) -> String {
        match self {
            Self::Bimodal { m2, trace_file } => {
                format!("sim bimodal {} {}", m2, trace_file.display())
            }
            Self::Gshare { m1, n, trace_file } => {
                format!("sim gshare {} {} {}", m1, n, trace_file.display())
            }
            Self::Hybrid { k, m1, n, m2, trace_file } => {
                format!("sim hybrid {} {} {} {} {}", k, m1, n, m2, trace_file.display())
            }
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut sim = Simulator::new(args.scheme.config())?;
    let trace = Trace::from_file(args.scheme.trace_file())?;
    sim.run(trace.records());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "COMMAND")?;
    writeln!(out, "{}", args.scheme.command_line())?;
    sim.write_report(&mut out)?;
    if let Some(n) = args.profile {
        sim.write_profile(&mut out, n)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
