//! PV estimator entry point — CLI wiring and config-driven evaluation.

use std::path::Path;
use std::process;

use pv_estimator::config::{
    EstimateConfig, PANEL_COUNT_MAX, PANEL_COUNT_MIN, SystemInput,
};
use pv_estimator::estimator::financial::classify_payback;
use pv_estimator::estimator::{Estimator, report};
use pv_estimator::io::export::{EstimateRow, export_csv};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    panel_type: Option<String>,
    panel_count: Option<u32>,
    tariff: Option<f32>,
    weather: Option<String>,
    battery: Option<f32>,
    csv_out: Option<String>,
    sweep_panels: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("pv-estimator — residential photovoltaic economics estimator");
    eprintln!();
    eprintln!("Usage: pv-estimator [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load configuration from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, no_battery, premium)");
    eprintln!("  --panel-type <name>      Override panel technology");
    eprintln!("  --panels <count>         Override panel count");
    eprintln!("  --tariff <per-kwh>       Override electricity tariff");
    eprintln!("  --weather <name>         Override weather condition");
    eprintln!("  --battery <kwh>          Override battery capacity");
    eprintln!("  --csv-out <path>         Export the estimate to CSV");
    eprintln!("  --sweep-panels           CSV export covers every valid panel count");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start JSON API server after the estimate");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        panel_type: None,
        panel_count: None,
        tariff: None,
        weather: None,
        battery: None,
        csv_out: None,
        sweep_panels: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--panel-type" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --panel-type requires a name argument");
                    process::exit(1);
                }
                cli.panel_type = Some(args[i].clone());
            }
            "--panels" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --panels requires a count argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<u32>() {
                    cli.panel_count = Some(n);
                } else {
                    eprintln!("error: --panels value \"{}\" is not a valid count", args[i]);
                    process::exit(1);
                }
            }
            "--tariff" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --tariff requires a value argument");
                    process::exit(1);
                }
                if let Ok(t) = args[i].parse::<f32>() {
                    cli.tariff = Some(t);
                } else {
                    eprintln!("error: --tariff value \"{}\" is not a valid number", args[i]);
                    process::exit(1);
                }
            }
            "--weather" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --weather requires a name argument");
                    process::exit(1);
                }
                cli.weather = Some(args[i].clone());
            }
            "--battery" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --battery requires a kWh argument");
                    process::exit(1);
                }
                if let Ok(b) = args[i].parse::<f32>() {
                    cli.battery = Some(b);
                } else {
                    eprintln!(
                        "error: --battery value \"{}\" is not a valid number",
                        args[i]
                    );
                    process::exit(1);
                }
            }
            "--csv-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --csv-out requires a path argument");
                    process::exit(1);
                }
                cli.csv_out = Some(args[i].clone());
            }
            "--sweep-panels" => {
                cli.sweep_panels = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Evaluates every valid panel count with the other inputs held fixed.
fn sweep_panel_counts(estimator: &Estimator, base: &SystemInput) -> Vec<EstimateRow> {
    let mut rows = Vec::new();
    for count in PANEL_COUNT_MIN..=PANEL_COUNT_MAX {
        let input = SystemInput {
            panel_count: count,
            ..base.clone()
        };
        match estimator.evaluate(&input) {
            Ok(estimate) => rows.push(EstimateRow { input, estimate }),
            Err(e) => {
                // Every swept count sits inside the validated bounds
                eprintln!("{e}");
                process::exit(1);
            }
        }
    }
    rows
}

fn main() {
    let cli = parse_args();

    if cli.sweep_panels && cli.csv_out.is_none() {
        eprintln!("error: --sweep-panels requires --csv-out");
        process::exit(1);
    }

    // Load config: --config takes priority, then --preset, then baseline default
    let mut config = if let Some(ref path) = cli.config_path {
        match EstimateConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match EstimateConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        EstimateConfig::baseline()
    };

    // Apply field overrides
    if let Some(panel_type) = cli.panel_type {
        config.system.panel_type = panel_type;
    }
    if let Some(count) = cli.panel_count {
        config.system.panel_count = count;
    }
    if let Some(tariff) = cli.tariff {
        config.system.tariff_per_kwh = tariff;
    }
    if let Some(weather) = cli.weather {
        config.system.weather = weather;
    }
    if let Some(battery) = cli.battery {
        config.system.battery_capacity_kwh = battery;
    }

    // Validate: report every violation, not just the first
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and evaluate
    let estimator = match Estimator::new(config.site.clone(), config.engine.clone()) {
        Ok(est) => est,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let estimate = match estimator.evaluate(&config.system) {
        Ok(estimate) => estimate,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print the estimate and the advisory
    println!("{estimate}");
    let class = classify_payback(estimate.payback, estimator.params());
    println!("\n{}", report::advisory(class));

    // Print chart series
    println!("\nProduction vs consumption:");
    for point in report::production_vs_consumption(&estimate, estimator.site()) {
        println!("  {:<12} {:.0} kWh", point.label, point.value_kwh);
    }
    println!("Household coverage:");
    for point in report::coverage_breakdown(&estimate, estimator.site()) {
        println!("  {:<12} {:.0} kWh", point.label, point.value_kwh);
    }

    // Export CSV if requested
    if let Some(ref path) = cli.csv_out {
        let rows = if cli.sweep_panels {
            sweep_panel_counts(&estimator, &config.system)
        } else {
            vec![EstimateRow {
                input: config.system.clone(),
                estimate: estimate.clone(),
            }]
        };
        if let Err(e) = export_csv(&rows, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Estimate written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(pv_estimator::api::AppState { estimator });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(pv_estimator::api::serve(state, addr));
    }
}
