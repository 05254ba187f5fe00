//! Usage recorder
//!
//! Runs a command and samples the CPU and RAM use of its whole process tree
//! at a fixed interval, appending one CSV row per sample. The file it writes
//! is the input of `plot_usage`.

use chrono::Local;
use clap::Parser;
use process_usage_plot::config::PlotConfig;
use process_usage_plot::usage::logger::setup_logging;
use process_usage_plot::usage::record::{UsageRecord, UsageWriter};
use process_usage_plot::usage::ProcessSampler;
use std::fmt::Debug;
use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::Duration;
use sysinfo::Pid;

/// Log a warning, kill the child if there is one, and exit with status 1
trait WarnAndExit<T> {
    fn warn_and_exit(self, msg: &str, child: Option<&mut Child>) -> T;
}

impl<T, E: Debug> WarnAndExit<T> for Result<T, E> {
    fn warn_and_exit(self, msg: &str, child: Option<&mut Child>) -> T {
        match self {
            Ok(val) => val,
            Err(e) => {
                log::warn!("{}: {:?}", msg, e);
                if let Some(child) = child {
                    log::info!("Killing child process: {}", child.id());
                    if let Err(kill_err) = child.kill() {
                        log::warn!("Failed to kill {}: {}", child.id(), kill_err);
                    }
                }
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(version, about)]
/// Run a command, monitoring CPU and RAM usage at regular intervals and saving to a CSV file.
struct Cli {
    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Polling interval (seconds)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Output CSV file [default: process_usage.csv]
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Command to run
    #[arg(last = true, required = true)]
    command: Vec<String>,
}

fn start_process(command: &[String]) -> Child {
    let (program, args) = match command.split_first() {
        Some(split) => split,
        None => {
            log::warn!("No command given");
            std::process::exit(1);
        }
    };

    Command::new(program).args(args).spawn().warn_and_exit(
        &format!("Command failed to start: {:?}", command.join(" ")),
        None,
    )
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, module_path!())?;

    let out_file = match cli.file {
        Some(path) => path,
        None => PlotConfig::from_registry()?.input_path,
    };

    let mut sampler = ProcessSampler::new();
    let total_memory = sampler.total_memory();
    log::debug!("Total memory: {} bytes", total_memory);

    let mut writer = UsageWriter::from_path(&out_file).warn_and_exit(
        &format!("Problem opening file: {}", out_file.display()),
        None,
    );

    let mut child = start_process(&cli.command);
    let pid = Pid::from_u32(child.id());
    let pause = Duration::from_secs(cli.interval);
    let start_time = Local::now();
    log::info!("Started {:?} as pid {}", cli.command.join(" "), pid);

    // Baseline for the first CPU delta
    sampler.refresh();

    loop {
        std::thread::sleep(pause);

        let status = child.try_wait().warn_and_exit(
            &format!("Command process failed: {}", cli.command.join(" ")),
            Some(&mut child),
        );
        if let Some(status) = status {
            log::info!("pid {} exited with {}", pid, status);
            break;
        }

        let usage = sampler.tree_usage(pid);
        let record = UsageRecord::new(start_time, Local::now(), total_memory, &usage);
        log::debug!("{:?}", record);

        writer.write(&record).warn_and_exit(
            &format!("Failed to write record: {:?}", record),
            Some(&mut child),
        );
    }

    log::info!("Waiting for command to complete...");
    child
        .wait()
        .warn_and_exit("Command wasn't running", None);

    log::info!("Usage report written to {}", out_file.display());
    Ok(())
}
