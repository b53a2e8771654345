//! # Voltcalc CLI
//!
//! Command line front end for `calc_core`. Each subcommand runs one
//! calculation and prints its text report, or JSON with `--json`.
//! Without a subcommand the sizing form is filled in interactively.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use calc_core::calculations::reliability::{ReliabilityInput, EQUIPMENT};
use calc_core::calculations::{
    run, CalculationOutput, CalculationRequest, EmissionInput, FuelInput, MazutInput, UndersupplyInput,
};
use calc_core::file_io::{load_request, save_json};
use calc_core::forms::{self, FormValues, SIZING_FIELDS};
use calc_core::report::render;

mod cli;
mod config;
mod logging;

use cli::{parse_item, Cli, Commands};
use config::CliConfig;

/// Read one line, falling back to `default` on empty input or a read error.
///
/// Only the line ending is stripped so the form parser sees the text as typed.
fn prompt_field(prompt: &str, default: &str) -> String {
    print!("{prompt} [{default}]: ");
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let input = input.trim_end_matches(['\r', '\n']);
    if input.is_empty() {
        default.to_string()
    } else {
        input.to_string()
    }
}

fn prompt_sizing_form() -> FormValues {
    let defaults = forms::sizing_defaults();
    let labels = [
        "Short-circuit current I_k (A)",
        "Fault clearing time t_f (s)",
        "Branch power S_m (kVA)",
        "Supply voltage (kV)",
        "Utilization time T_m (h)",
        "Source short-circuit power (MVA)",
    ];

    SIZING_FIELDS
        .iter()
        .zip(labels)
        .map(|(field, label)| {
            let default = defaults.get(*field).map(String::as_str).unwrap_or("");
            (field.to_string(), prompt_field(label, default))
        })
        .collect()
}

fn build_request(command: Commands, config: &CliConfig) -> anyhow::Result<CalculationRequest> {
    let request = match command {
        Commands::Sizing(args) => CalculationRequest::CableSizing(forms::sizing_input(&args.form(), config.parse_mode)?),
        Commands::ShortCircuit(args) => {
            CalculationRequest::ShortCircuit(forms::cascade_input(&args.form()?, config.parse_mode)?)
        }
        Commands::Fuel(a) => CalculationRequest::Fuel(FuelInput {
            hydrogen: a.hydrogen,
            carbon: a.carbon,
            sulfur: a.sulfur,
            nitrogen: a.nitrogen,
            oxygen: a.oxygen,
            moisture: a.moisture,
            ash: a.ash,
        }),
        Commands::Mazut(a) => CalculationRequest::Mazut(MazutInput {
            carbon: a.carbon,
            hydrogen: a.hydrogen,
            oxygen: a.oxygen,
            sulfur: a.sulfur,
            combustible_heat_mj_kg: a.combustible_heat,
            vanadium_mg_kg: a.vanadium,
            moisture: a.moisture,
            ash: a.ash,
        }),
        Commands::Emissions { fuel, mass } => CalculationRequest::Emissions(EmissionInput { fuel, mass_t: mass }),
        Commands::Imbalance(args) => CalculationRequest::Imbalance(forms::imbalance_input(&args.form())?),
        Commands::Reliability { items, switch } => {
            let input = if items.is_empty() {
                ReliabilityInput {
                    switch_id: switch,
                    ..ReliabilityInput::default()
                }
            } else {
                ReliabilityInput {
                    equipment: items.iter().map(|i| parse_item(i)).collect::<anyhow::Result<_>>()?,
                    switch_id: switch,
                }
            };
            CalculationRequest::Reliability(input)
        }
        Commands::Losses(a) => CalculationRequest::Undersupply(UndersupplyInput {
            failure_rate: a.omega,
            restoration_time: a.restoration_time,
            max_load_kw: a.max_load,
            planned_outage_coefficient: a.planned_outage,
            utilization_hours: a.utilization_hours,
            emergency_loss_per_kwh: a.emergency_loss,
            planned_loss_per_kwh: a.planned_loss,
        }),
        Commands::Run { request } => {
            load_request(&request).with_context(|| format!("loading request {}", request.display()))?
        }
        Commands::Equipment => anyhow::bail!("the equipment listing is not a calculation"),
    };
    Ok(request)
}

fn print_equipment() {
    println!("{:>3}  {:<40} {:>7} {:>7} {:>7} {:>7}  per", "id", "equipment", "ω", "t_v", "μ", "t_p");
    for e in EQUIPMENT.iter() {
        let per = if e.requires_length {
            "km"
        } else if e.requires_quantity {
            "connection"
        } else {
            "unit"
        };
        println!(
            "{:>3}  {:<40} {:>7} {:>7} {:>7} {:>7}  {per}",
            e.id, e.name, e.failure_rate, e.restoration_time_h, e.planned_outage_rate, e.planned_outage_h
        );
    }
}

fn emit(output: &CalculationOutput, config: &CliConfig) -> anyhow::Result<()> {
    if config.json {
        println!("{}", serde_json::to_string_pretty(output)?);
    } else {
        println!("{}", render(output));
    }

    if let Some(path) = &config.output {
        save_json(output, path).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "output written");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let config = CliConfig::from_cli(&cli);
    let (cable_source, density_source) = config.catalog_sources();
    debug!(cables = %cable_source, densities = %density_source, "loading catalogs");
    let catalogs = config.load_catalogs().context("loading catalogs")?;

    let request = match cli.command {
        Some(Commands::Equipment) => {
            print_equipment();
            return Ok(());
        }
        Some(command) => build_request(command, &config)?,
        None => {
            println!("Voltcalc - cable sizing");
            println!("=======================");
            println!();
            let form = prompt_sizing_form();
            println!();
            CalculationRequest::CableSizing(forms::sizing_input(&form, config.parse_mode)?)
        }
    };

    info!(calc_type = request.calc_type(), "{}", request.label());
    let output = run(&request, &catalogs)?;
    emit(&output, &config)
}
