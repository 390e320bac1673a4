use chemo_core::report::{patient_intro, provider_summary};
use chemo_core::*;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chemocalc")]
#[command(about = "Whole-tablet oral chemotherapy schedule calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate and print a schedule (default)
    Calc {
        #[command(flatten)]
        dose: DoseArgs,

        /// Print the full calculation as JSON
        #[arg(long, conflicts_with = "sig_only")]
        json: bool,

        /// Print only the pharmacy Sig line
        #[arg(long, conflicts_with = "json")]
        sig_only: bool,
    },

    /// Export a provider or patient document (RTF)
    Export {
        /// Document audience
        #[arg(value_enum)]
        audience: Audience,

        /// Output file (defaults to a standard name in the current directory)
        #[arg(long, short)]
        out: Option<PathBuf>,

        #[command(flatten)]
        dose: DoseArgs,
    },

    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Dose inputs; anything omitted falls back to the config's regimen
#[derive(Args, Default)]
struct DoseArgs {
    /// Body surface area (m^2)
    #[arg(long)]
    bsa: Option<f64>,

    /// Dose per m^2 per day (mg)
    #[arg(long)]
    dose: Option<f64>,

    /// Course length in days
    #[arg(long)]
    days: Option<u32>,

    /// Tablet strength (mg)
    #[arg(long)]
    tablet_mg: Option<f64>,

    /// Schedule mode (front-load-overall, weekly-front-load, alternating)
    #[arg(long)]
    mode: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Audience {
    Provider,
    Patient,
}

impl From<Audience> for DocumentKind {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::Provider => DocumentKind::Provider,
            Audience::Patient => DocumentKind::Patient,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        chemo_core::logging::init_with_level("debug");
    } else {
        chemo_core::logging::init();
    }

    match cli.command {
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config, force),
        Some(Commands::Calc {
            dose,
            json,
            sig_only,
        }) => cmd_calc(&dose, json, sig_only, &load_config(cli.config.as_deref())?),
        Some(Commands::Export { audience, out, dose }) => cmd_export(
            audience.into(),
            out,
            &dose,
            &load_config(cli.config.as_deref())?,
        ),
        None => {
            // Default to "calc" with configured regimen
            let config = load_config(cli.config.as_deref())?;
            cmd_calc(&DoseArgs::default(), false, false, &config)
        }
    }
}

/// Load the config from `--config` or the default location
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Merge command-line values over the configured regimen and run the pipeline
fn run_calculation(dose: &DoseArgs, config: &Config) -> Result<Calculation> {
    let regimen = &config.regimen;
    let inputs = DoseInputs::new(
        dose.bsa.unwrap_or(regimen.bsa),
        dose.dose.unwrap_or(regimen.mg_per_m2_day),
        dose.days.unwrap_or(regimen.days),
        dose.tablet_mg.unwrap_or(regimen.tablet_size_mg),
    )?;
    let mode = match &dose.mode {
        Some(mode) => mode.parse::<ScheduleMode>()?,
        None => regimen.mode,
    };
    tracing::debug!("Resolved inputs {:?} with mode {:?}", inputs, mode);

    calculate(&inputs, mode)
}

fn cmd_calc(dose: &DoseArgs, json: bool, sig_only: bool, config: &Config) -> Result<()> {
    let calc = run_calculation(dose, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&calc)?);
        return Ok(());
    }

    if sig_only {
        println!("{}", calc.sig);
        return Ok(());
    }

    display_calculation(&calc, config);
    Ok(())
}

fn cmd_export(
    kind: DocumentKind,
    out: Option<PathBuf>,
    dose: &DoseArgs,
    config: &Config,
) -> Result<()> {
    let calc = run_calculation(dose, config)?;
    let path = out.unwrap_or_else(|| PathBuf::from(kind.default_file_name()));

    let prepared_on = chrono::Local::now().date_naive();
    let contents = kind.render(&calc, &config.export, prepared_on);
    write_document(&path, &contents)?;

    println!("✓ Saved {:?} document to {}", kind, path.display());
    Ok(())
}

fn cmd_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path
        .or_else(Config::default_config_path)
        .ok_or_else(|| Error::Config("No config directory available; pass --config".into()))?;

    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn display_calculation(calc: &Calculation, config: &Config) {
    println!("\n── Provider Summary ──────────────────────");
    println!("{}", provider_summary(calc));
    println!();
    println!("── Calendar ──────────────────────────────");
    println!(
        "{}",
        render_calendar(
            &calc.schedule,
            calc.inputs.tablet_strength_mg(),
            config.export.columns
        )
    );
    println!();
    println!("── Pharmacy Sig ──────────────────────────");
    println!("{}", calc.sig);
    println!();
    println!(
        "Total tablets to dispense: {} (each {} mg)",
        calc.total_tablets,
        calendar::format_mg(calc.inputs.tablet_strength_mg())
    );
    println!();
    println!("Patient note: {}", patient_intro(calc));
    println!();
    println!(
        "Verify dosing with institutional protocol. This tool ignores renal/hepatic function, ANC/platelets, and interactions."
    );
}
