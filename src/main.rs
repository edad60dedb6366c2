mod cli;

use fragseek::{
    config, level,
    planner::{self, NextFragmentRequest},
};
use fragseek_common::time::{format_program_date_time, parse_pdt_argument};
use fragseek_media::{find_fragment_by_pdt, Fragment};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "fragseek=trace,fragseek_media=trace".to_string()
        } else {
            "fragseek=info,fragseek_media=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Next {
            playlist,
            buffer_end,
            end,
            previous_sn,
            start,
            discontinuity,
            tolerance,
            json,
        } => {
            let request = NextFragmentRequest {
                buffer_end,
                end,
                previous_sn,
                previous_fragment: None,
                start,
                discontinuity,
            };
            next_fragment(&playlist, cli.config.as_deref(), &request, tolerance, json)
        }
        Commands::Pdt { playlist, at, json } => fragment_at_pdt(&playlist, &at, json),
        Commands::Inspect { playlist, json } => inspect(&playlist, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("fragseek {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn next_fragment(
    playlist: &Path,
    config_path: Option<&Path>,
    request: &NextFragmentRequest,
    tolerance: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    if let Some(tolerance) = tolerance {
        config.locator.max_frag_lookup_tolerance = tolerance;
        config::validate_config(&config)?;
    }

    let level = level::load_level(playlist)?;
    let selection = planner::plan_next_fragment(&level, request, &config.locator);

    if json {
        let value = match selection {
            Some(selection) => serde_json::json!({
                "fragment": selection.fragment,
                "strategy": selection.strategy,
                "projectedPdt": selection.projected_pdt,
            }),
            None => serde_json::json!({ "fragment": null }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match selection {
        Some(selection) => {
            print_fragment(selection.fragment);
            println!("Strategy: {:?}", selection.strategy);
            if let Some(pdt) = selection.projected_pdt.and_then(format_program_date_time) {
                println!("Projected PDT: {}", pdt);
            }
        }
        None => println!("No fragment to load."),
    }

    Ok(())
}

fn fragment_at_pdt(playlist: &Path, at: &str, json: bool) -> Result<()> {
    let pdt = parse_pdt_argument(at)?;

    let level = level::load_level(playlist)?;
    let fragment = find_fragment_by_pdt(&level.fragments, Some(pdt));

    if json {
        println!("{}", serde_json::to_string_pretty(&fragment)?);
        return Ok(());
    }

    match fragment {
        Some(fragment) => print_fragment(fragment),
        None => println!("No fragment covers {}.", at),
    }

    Ok(())
}

fn inspect(playlist: &Path, json: bool) -> Result<()> {
    let level = level::load_level(playlist)?;

    if json {
        println!("{}", level.to_json_pretty()?);
        return Ok(());
    }

    println!("Fragments: {}", level.fragments.len());
    println!("Start SN: {}", level.start_sn);
    println!("Duration: {:.3}s", level.total_duration());
    println!("Type: {}", if level.live { "live" } else { "vod" });
    if let Some(ref pdt) = level.program_date_time {
        println!("Program date time: {}", pdt);
    }

    println!();
    for fragment in &level.fragments {
        print!(
            "  sn={} cc={} start={:.3} duration={:.3}",
            fragment.sn, fragment.cc, fragment.start, fragment.duration
        );
        if let Some(pdt) = fragment.pdt().and_then(format_program_date_time) {
            print!(" pdt={}", pdt);
        }
        println!();
    }

    Ok(())
}

fn print_fragment(fragment: &Fragment) {
    println!("SN: {}", fragment.sn);
    println!("Start: {:.3}s", fragment.start);
    println!("Duration: {:.3}s", fragment.duration);
    if let Some(ref uri) = fragment.uri {
        println!("URI: {}", uri);
    }
    if let Some(pdt) = fragment.pdt().and_then(format_program_date_time) {
        println!("PDT: {}", pdt);
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!(
                "  Max fragment lookup tolerance: {}s",
                config.locator.max_frag_lookup_tolerance
            );
            println!(
                "  Use program date time: {}",
                config.locator.use_program_date_time
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!(
                "  Max fragment lookup tolerance: {}s",
                config.locator.max_frag_lookup_tolerance
            );
        }
    }

    Ok(())
}
