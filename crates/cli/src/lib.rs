pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "plansim",
    about = "Internet plan validation and usage simulation CLI",
    long_about = "Validate internet service plans against usage scenarios: fair-usage \
                  throttling, data-cap overage, time windows, cost estimation, and a \
                  graded rule battery.",
    after_help = "Examples:\n  plansim validate --plan fiber500.toml --preset heavy --json\n  plansim remote --preset moderate --endpoint https://validator.example.net/v1/validate\n  plansim presets --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the local validation engine against a plan and scenario")]
    Validate {
        #[arg(long, value_name = "FILE", help = "Plan configuration TOML file")]
        plan: PathBuf,
        #[arg(
            long,
            value_name = "FILE",
            conflicts_with = "preset",
            help = "Usage scenario TOML file"
        )]
        scenario: Option<PathBuf>,
        #[arg(long, value_name = "NAME", help = "Scenario preset: light|moderate|heavy|custom")]
        preset: Option<String>,
        #[arg(long, default_value_t = 720.0, help = "Scenario window length in hours")]
        duration_hours: f64,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Submit the scenario to a remote validation endpoint")]
    Remote {
        #[arg(
            long,
            value_name = "FILE",
            conflicts_with = "preset",
            help = "Usage scenario TOML file"
        )]
        scenario: Option<PathBuf>,
        #[arg(long, value_name = "NAME", help = "Scenario preset: light|moderate|heavy|custom")]
        preset: Option<String>,
        #[arg(long, default_value_t = 720.0, help = "Scenario window length in hours")]
        duration_hours: f64,
        #[arg(long, value_name = "URL", help = "Override the configured remote endpoint")]
        endpoint: Option<String>,
    },
    #[command(about = "List the built-in usage scenario presets")]
    Presets {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values after all overrides")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate { plan, scenario, preset, duration_hours, json } => {
            commands::validate::run(&plan, scenario.as_deref(), preset.as_deref(), duration_hours, json)
        }
        Command::Remote { scenario, preset, duration_hours, endpoint } => {
            commands::remote::run(scenario.as_deref(), preset.as_deref(), duration_hours, endpoint)
        }
        Command::Presets { json } => commands::presets::run(json),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
