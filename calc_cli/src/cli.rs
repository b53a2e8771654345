use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use calc_core::calculations::reliability::{equipment_by_id, SelectedEquipment};
use calc_core::calculations::FuelKind;
use calc_core::forms::{FormValues, CASCADE_FIELDS};

#[derive(Parser, Debug)]
#[command(name = "voltcalc", author, version, about = "Power supply calculations", long_about = None)]
pub struct Cli {
    /// Set the logging level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: tracing::Level,

    /// Cable catalog JSON file (built-in catalog when omitted)
    #[arg(long, env = "VOLTCALC_CABLE_CATALOG", value_name = "FILE", global = true)]
    pub cable_catalog: Option<PathBuf>,

    /// Economic density table JSON file (built-in table when omitted)
    #[arg(long, env = "VOLTCALC_DENSITY_CATALOG", value_name = "FILE", global = true)]
    pub density_catalog: Option<PathBuf>,

    /// Reject form values that are not numbers instead of reading them as 0
    #[arg(long, global = true)]
    pub strict: bool,

    /// Print JSON instead of the text report
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write the JSON output to a file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Size a feeder cable by thermal stability and economic density
    Sizing(SizingArgs),
    /// Short-circuit currents along a transformer feeder
    ShortCircuit(CascadeArgs),
    /// Fuel composition on dry and combustible mass
    Fuel(FuelArgs),
    /// Fuel oil composition on the working mass
    Mazut(MazutArgs),
    /// Solid particle emissions from burning fuel
    Emissions {
        /// coal, fuel-oil or natural-gas
        #[arg(long, default_value = "coal")]
        fuel: FuelKind,
        /// Burned mass (t)
        #[arg(long, default_value_t = 1_096_363.0)]
        mass: f64,
    },
    /// Solar plant revenue against a daily power forecast
    Imbalance(ImbalanceArgs),
    /// Single vs. double circuit supply reliability
    Reliability {
        /// Equipment as ID or ID:AMOUNT (km for lines, count for busbars)
        #[arg(long = "item", value_name = "ID[:AMOUNT]")]
        items: Vec<String>,
        /// Sectionalizing breaker equipment ID
        #[arg(long, default_value_t = 11)]
        switch: u32,
    },
    /// List the reference equipment table
    Equipment,
    /// Expected undersupplied energy and its cost
    Losses(LossesArgs),
    /// Run a calculation request from a JSON file
    Run {
        /// Path to the request file
        request: PathBuf,
    },
}

/// Sizing form fields, kept as text so lenient parsing applies
#[derive(Args, Debug, Clone)]
pub struct SizingArgs {
    /// Short-circuit current I_k (A)
    #[arg(long = "current-ik", default_value = "2500")]
    pub current_ik: String,
    /// Fault clearing time t_f (s)
    #[arg(long = "time-tf", default_value = "2.5")]
    pub time_tf: String,
    /// Branch apparent power S_m (kVA)
    #[arg(long = "power-sm", default_value = "1300")]
    pub power_sm: String,
    /// Supply voltage (kV)
    #[arg(long, default_value = "10")]
    pub voltage: String,
    /// Utilization time T_m (h/year)
    #[arg(long = "time-tm", default_value = "4000")]
    pub time_tm: String,
    /// Short-circuit power of the source (MVA)
    #[arg(long = "power-kz", default_value = "2000")]
    pub power_kz: String,
}

impl SizingArgs {
    pub fn form(&self) -> FormValues {
        to_form(&[
            ("currentIk", &self.current_ik),
            ("timeTf", &self.time_tf),
            ("powerSm", &self.power_sm),
            ("voltage", &self.voltage),
            ("timeTm", &self.time_tm),
            ("powerKZ", &self.power_kz),
        ])
    }
}

#[derive(Args, Debug, Clone)]
pub struct CascadeArgs {
    /// Maximum transformer short-circuit voltage (%)
    #[arg(long = "uk-max", default_value = "11.1")]
    pub uk_max: String,
    /// High-side voltage (kV)
    #[arg(long = "u-vn", default_value = "115")]
    pub u_vn: String,
    /// Low-side voltage (kV)
    #[arg(long = "u-nn", default_value = "11")]
    pub u_nn: String,
    /// Transformer rated power (MVA)
    #[arg(long = "s-nom-t", default_value = "6.3")]
    pub s_nom_t: String,
    #[arg(long = "rc-n", default_value = "10.65")]
    pub rc_n: String,
    #[arg(long = "xc-n", default_value = "24.02")]
    pub xc_n: String,
    #[arg(long = "rc-min", default_value = "34.88")]
    pub rc_min: String,
    #[arg(long = "xc-min", default_value = "65.68")]
    pub xc_min: String,
    /// Line resistance (Ω/km)
    #[arg(long, default_value = "0.64")]
    pub r0: String,
    /// Line reactance (Ω/km)
    #[arg(long, default_value = "0.363")]
    pub x0: String,
    /// Section lengths 1-2, 2-3, 4-5, 5-6, 6-7, 7-8, 8-9, 9-10 (km)
    #[arg(
        long = "sections",
        value_delimiter = ',',
        default_values = ["0.2", "0.35", "0.2", "0.6", "2.0", "2.55", "3.37", "3.1"]
    )]
    pub sections: Vec<String>,
}

impl CascadeArgs {
    /// Form values for the cascade. `--sections` must list all eight lengths.
    pub fn form(&self) -> anyhow::Result<FormValues> {
        let section_fields = &CASCADE_FIELDS[10..];
        if self.sections.len() != section_fields.len() {
            bail!(
                "--sections needs {} comma-separated lengths, got {}",
                section_fields.len(),
                self.sections.len()
            );
        }

        let mut form = to_form(&[
            ("uKmax", &self.uk_max),
            ("uVn", &self.u_vn),
            ("uNn", &self.u_nn),
            ("sNomT", &self.s_nom_t),
            ("rc_n", &self.rc_n),
            ("xc_n", &self.xc_n),
            ("rc_min", &self.rc_min),
            ("xc_min", &self.xc_min),
            ("r0", &self.r0),
            ("x0", &self.x0),
        ]);
        for (name, value) in section_fields.iter().zip(&self.sections) {
            form.insert(name.to_string(), value.clone());
        }
        Ok(form)
    }
}

#[derive(Args, Debug, Clone)]
pub struct FuelArgs {
    #[arg(long, default_value_t = 1.9)]
    pub hydrogen: f64,
    #[arg(long, default_value_t = 21.1)]
    pub carbon: f64,
    #[arg(long, default_value_t = 2.6)]
    pub sulfur: f64,
    #[arg(long, default_value_t = 0.2)]
    pub nitrogen: f64,
    #[arg(long, default_value_t = 7.1)]
    pub oxygen: f64,
    #[arg(long, default_value_t = 53.0)]
    pub moisture: f64,
    #[arg(long, default_value_t = 14.1)]
    pub ash: f64,
}

#[derive(Args, Debug, Clone)]
pub struct MazutArgs {
    #[arg(long, default_value_t = 85.5)]
    pub carbon: f64,
    #[arg(long, default_value_t = 11.2)]
    pub hydrogen: f64,
    #[arg(long, default_value_t = 0.8)]
    pub oxygen: f64,
    #[arg(long, default_value_t = 2.5)]
    pub sulfur: f64,
    /// Lower heating value of the combustible mass (MJ/kg)
    #[arg(long = "heat", default_value_t = 40.4)]
    pub combustible_heat: f64,
    /// Vanadium (mg/kg)
    #[arg(long, default_value_t = 333.3)]
    pub vanadium: f64,
    #[arg(long, default_value_t = 2.0)]
    pub moisture: f64,
    #[arg(long, default_value_t = 0.15)]
    pub ash: f64,
}

/// Imbalance form fields, parsed strictly
#[derive(Args, Debug, Clone)]
pub struct ImbalanceArgs {
    /// Average daily power (MW)
    #[arg(long = "daily-power", default_value = "5")]
    pub daily_power: String,
    /// Current forecast standard deviation (MW)
    #[arg(long = "current-std-dev", default_value = "1")]
    pub current_std_dev: String,
    /// Improved forecast standard deviation (MW)
    #[arg(long = "future-std-dev", default_value = "0.25")]
    pub future_std_dev: String,
    /// Energy price (thousand UAH/MWh)
    #[arg(long = "energy-cost", default_value = "7")]
    pub energy_cost: String,
}

impl ImbalanceArgs {
    pub fn form(&self) -> FormValues {
        to_form(&[
            ("dailyPower", &self.daily_power),
            ("currentStdDev", &self.current_std_dev),
            ("futureStdDev", &self.future_std_dev),
            ("energyCost", &self.energy_cost),
        ])
    }
}

#[derive(Args, Debug, Clone)]
pub struct LossesArgs {
    /// Failure rate (1/year)
    #[arg(long, default_value_t = 0.1)]
    pub omega: f64,
    /// Mean restoration time (years)
    #[arg(long = "t-v", default_value_t = 0.045)]
    pub restoration_time: f64,
    /// Maximum load (kW)
    #[arg(long = "p-m", default_value_t = 5120.0)]
    pub max_load: f64,
    /// Planned outage coefficient
    #[arg(long = "k-p", default_value_t = 0.004)]
    pub planned_outage: f64,
    /// Utilization time (h)
    #[arg(long = "t-m", default_value_t = 6451.0)]
    pub utilization_hours: f64,
    /// Emergency loss (UAH/kWh)
    #[arg(long = "z-per-a", default_value_t = 23.6)]
    pub emergency_loss: f64,
    /// Planned loss (UAH/kWh)
    #[arg(long = "z-per-p", default_value_t = 17.6)]
    pub planned_loss: f64,
}

fn to_form(pairs: &[(&str, &String)]) -> FormValues {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), (*value).clone()))
        .collect()
}

/// Parse a reliability item given as `ID` or `ID:AMOUNT`.
///
/// The amount is the line length for lines and the connection count for
/// busbars; other equipment ignores it.
pub fn parse_item(text: &str) -> anyhow::Result<SelectedEquipment> {
    let (id, amount) = match text.split_once(':') {
        Some((id, amount)) => (id, Some(amount)),
        None => (text, None),
    };
    let id: u32 = id.trim().parse().with_context(|| format!("invalid equipment id in '{text}'"))?;
    let Some(equipment) = equipment_by_id(id) else {
        bail!("unknown equipment id {id}");
    };

    let amount: f64 = match amount {
        Some(a) => a.trim().parse().with_context(|| format!("invalid amount in '{text}'"))?,
        None => 0.0,
    };
    if (equipment.requires_length || equipment.requires_quantity) && amount <= 0.0 {
        bail!("{} needs an amount, e.g. {id}:2", equipment.name);
    }

    Ok(SelectedEquipment {
        id,
        length_km: amount,
        quantity: amount.round() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let line = parse_item("1:10.5").unwrap();
        assert_eq!(line.id, 1);
        assert_eq!(line.length_km, 10.5);

        let busbars = parse_item("6:2").unwrap();
        assert_eq!(busbars.quantity, 2);

        let transformer = parse_item("7").unwrap();
        assert_eq!(transformer.id, 7);

        assert!(parse_item("1").is_err());
        assert!(parse_item("42").is_err());
        assert!(parse_item("x:1").is_err());
    }

    #[test]
    fn test_sizing_defaults_match_core() {
        let cli = Cli::try_parse_from(["voltcalc", "sizing"]).unwrap();
        let Some(Commands::Sizing(args)) = cli.command else {
            panic!("expected sizing");
        };
        let input = calc_core::forms::sizing_input(&args.form(), calc_core::forms::ParseMode::Strict).unwrap();
        assert_eq!(input, calc_core::calculations::SizingInput::default());
    }

    #[test]
    fn test_cascade_defaults_match_core() {
        let cli = Cli::try_parse_from(["voltcalc", "short-circuit"]).unwrap();
        let Some(Commands::ShortCircuit(args)) = cli.command else {
            panic!("expected short-circuit");
        };
        let input = calc_core::forms::cascade_input(&args.form().unwrap(), calc_core::forms::ParseMode::Strict).unwrap();
        assert_eq!(input, calc_core::calculations::CascadeInput::default());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["voltcalc", "fuel", "--json", "--strict"]).unwrap();
        assert!(cli.json);
        assert!(cli.strict);
        assert!(matches!(cli.command, Some(Commands::Fuel(_))));
    }

    #[test]
    fn test_emissions_fuel_kind() {
        let cli = Cli::try_parse_from(["voltcalc", "emissions", "--fuel", "natural-gas"]).unwrap();
        match cli.command {
            Some(Commands::Emissions { fuel, .. }) => assert_eq!(fuel, FuelKind::NaturalGas),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_sections_count_is_checked() {
        let parse = |sections: &str| {
            let cli = Cli::try_parse_from(["voltcalc", "short-circuit", "--sections", sections]).unwrap();
            let Some(Commands::ShortCircuit(args)) = cli.command else {
                panic!("expected short-circuit");
            };
            args.form()
        };

        assert!(parse("1,1,1,1,1,1,1").is_err());
        assert!(parse("1,1,1,1,1,1,1,1,1").is_err());

        let form = parse("1,2,3,4,5,6,7,8").unwrap();
        assert_eq!(form["section1_2"], "1");
        assert_eq!(form["section9_10"], "8");
    }
}
