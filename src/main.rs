use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn, Level};

use fuelrs::advice::{Advisor, ProductCheck, ProductComposition, ProductVerdict, SessionContext};
use fuelrs::config::AppConfig;
use fuelrs::error::{ExportError, FuelRsError};
use fuelrs::export::{self, ReportFormat};
use fuelrs::logging::{init_logging, LogFormat};
use fuelrs::models::WorkoutInput;
use fuelrs::plan::{DurationRange, FuelingPlanner, ZoneMinutes};

/// FuelRS - Endurance fueling calculator
///
/// Computes carbohydrate targets, the glucose/fructose ratio and an hourly
/// drink formulation from workout duration and time spent in zones 6/5, 4
/// and 3.
#[derive(Parser)]
#[command(name = "fuelrs")]
#[command(version)]
#[command(about = "Carbohydrate and drink planning for endurance workouts", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the fueling plan for one workout
    Plan {
        /// Workout duration in hours
        #[arg(short, long, allow_negative_numbers = true)]
        duration: Decimal,

        /// Minutes in zone 6/5 (VO2max)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z6: i64,

        /// Minutes in zone 4 (threshold)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z4: i64,

        /// Minutes in zone 3 (tempo)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z3: i64,

        /// Session type (training, race)
        #[arg(long)]
        context: Option<SessionContext>,

        /// Report format (text, json, csv, table)
        #[arg(short = 'f', long)]
        format: Option<ReportFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute plans over a range of workout durations
    Sweep {
        /// First duration in hours
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        from: Decimal,

        /// Last duration in hours (inclusive)
        #[arg(long, default_value = "6.0", allow_negative_numbers = true)]
        to: Decimal,

        /// Step between durations in hours
        #[arg(long, default_value = "0.25", allow_negative_numbers = true)]
        step: Decimal,

        /// Minutes in zone 6/5 (VO2max)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z6: i64,

        /// Minutes in zone 4 (threshold)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z4: i64,

        /// Minutes in zone 3 (tempo)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z3: i64,

        /// Report format (text, json, csv, table)
        #[arg(short = 'f', long)]
        format: Option<ReportFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a solid product's nutrition label (per 100 g)
    CheckProduct {
        /// Fat per 100 g
        #[arg(long, allow_negative_numbers = true)]
        fat: Decimal,

        /// Protein per 100 g
        #[arg(long, allow_negative_numbers = true)]
        protein: Decimal,

        /// Fiber per 100 g
        #[arg(long, allow_negative_numbers = true)]
        fiber: Decimal,

        /// The product is candy
        #[arg(long)]
        candy: bool,
    },

    /// Show solid food and product advice
    Advice {
        /// Session type (training, race)
        #[arg(long)]
        context: Option<SessionContext>,
    },

    /// Show or create the configuration file
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        list: bool,

        /// Write a default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => report_failure(&err),
    };

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    init_logging(&log_config)?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    match run(&cli, &config) {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<FuelRsError>() {
            Some(fuel_err) => report_failure(fuel_err),
            None => Err(err),
        },
    }
}

/// Log a domain error, print its user message and exit with status 2
fn report_failure(err: &FuelRsError) -> ! {
    if err.severity().to_tracing_level() == Level::WARN {
        warn!(error = %err, "Request rejected");
    } else {
        error!(error = %err, "Request failed");
    }
    eprintln!("{} {}", "Error:".red().bold(), err.user_message());
    std::process::exit(2);
}

fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    match &cli.command {
        Commands::Plan {
            duration,
            z6,
            z4,
            z3,
            context,
            format,
            output,
        } => {
            let input = WorkoutInput::from_signed(*duration, *z6, *z4, *z3)
                .map_err(FuelRsError::from)?;
            let context = context.unwrap_or(config.output.context);
            let format = format.unwrap_or(config.output.format);

            let plan = FuelingPlanner::plan(&input, context)?;
            info!(
                total_g = plan.demand.total_g,
                rate_g_per_h = plan.demand.rate_g_per_h,
                "Plan ready"
            );

            emit(output.as_deref(), |writer| export::write_plan(&plan, format, writer))?;
        }

        Commands::Sweep {
            from,
            to,
            step,
            z6,
            z4,
            z3,
            format,
            output,
        } => {
            let zones = ZoneMinutes::from_signed(*z6, *z4, *z3).map_err(FuelRsError::from)?;
            let range = DurationRange {
                from_h: *from,
                to_h: *to,
                step_h: *step,
            };
            let format = format.unwrap_or(config.output.format);

            let plans = FuelingPlanner::sweep(zones, &range, config.output.context)?;

            emit(output.as_deref(), |writer| export::write_sweep(&plans, format, writer))?;
        }

        Commands::CheckProduct {
            fat,
            protein,
            fiber,
            candy,
        } => {
            let product = ProductComposition {
                fat_g: *fat,
                protein_g: *protein,
                fiber_g: *fiber,
                is_candy: *candy,
            };

            let verdict = ProductCheck::evaluate(&product).map_err(FuelRsError::from)?;
            info!(suitable = verdict.is_suitable(), candy = *candy, "Product checked");

            match verdict {
                ProductVerdict::Suitable => {
                    println!("{}", "✓ Suitable for fueling during exercise".green().bold());
                }
                ProductVerdict::Unsuitable { exceeded } => {
                    println!("{}", "✗ Not suitable during exercise".red().bold());
                    for nutrient in exceeded {
                        println!(
                            "  {} {} g per 100 g (limit {} g)",
                            nutrient.nutrient,
                            nutrient.grams_per_100g,
                            fuelrs::advice::MAX_SLOW_NUTRIENT_G_PER_100G
                        );
                    }
                    println!("  These nutrients slow carbohydrate absorption.");
                }
                ProductVerdict::NotRecommended => {
                    println!("{}", "✗ Candy is not recommended".red().bold());
                    println!("  Additives, colorings and sweeteners make it a poor choice.");
                }
            }
        }

        Commands::Advice { context } => {
            let context = context.unwrap_or(config.output.context);
            let guidance = Advisor::solid_food(context);

            println!("{}", format!("Solid food ({})", context).cyan().bold());
            for option in &guidance.options {
                println!("  • {}", option.description());
            }
            for note in &guidance.notes {
                println!("  • {}", note);
            }
            println!();
            println!("{}", "Industrial products".yellow().bold());
            for caveat in Advisor::product_caveats() {
                println!("  • {}", caveat);
            }
        }

        Commands::Config { list, init } => {
            let config_path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);

            if *init {
                if config_path.exists() {
                    println!("Config already exists: {}", config_path.display());
                } else {
                    AppConfig::default().save_to_file(&config_path)?;
                    println!("{} {}", "✓ Wrote".green(), config_path.display());
                }
            }

            if *list || !*init {
                println!("{}", format!("# {}", config_path.display()).dimmed());
                print!("{}", config.to_toml()?);
            }
        }
    }

    Ok(())
}

/// Send a report to a file or to stdout
fn emit<F>(output: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::result::Result<(), ExportError>,
{
    match output {
        Some(path) => {
            colored::control::set_override(false);
            let mut writer = export::create_output(path).map_err(FuelRsError::from)?;
            write(&mut writer).map_err(FuelRsError::from)?;
            writer.flush().map_err(FuelRsError::from)?;
            eprintln!("✓ Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write(&mut handle).map_err(FuelRsError::from)?;
            handle.flush().map_err(FuelRsError::from)?;
        }
    }
    Ok(())
}
