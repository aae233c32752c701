//! Config command handler

use crate::args::ConfigSubcommand;
use sorting_hat::config::Config;
use sorting_hat::logger::Level;
use std::io::{self, Write};

/// Dispatch config subcommands
///
/// # Errors
/// Returns a user-facing message if a key is unknown, a value does not parse,
/// or the config file cannot be written.
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn show(config: &Config, key: Option<&str>) -> Result<(), String> {
    let Some(key) = key else {
        println!("\n=== Configuration ===");
        println!("# {}\n", Config::get_config_file_path().display());
        print!("{config}");
        return Ok(());
    };

    match config.get(key) {
        Some(value) if value.is_empty() => println!("(unset)"),
        Some(value) => println!("{value}"),
        None => return Err(format!("✗ Unknown config key: '{key}'")),
    }
    Ok(())
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    if key == "level" {
        value
            .parse::<Level>()
            .map_err(|e| format!("✗ {e}"))?;
    }
    config.set(key, value).map_err(|e| format!("✗ {e}"))?;
    save(config)?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults).map_err(|e| format!("✗ {e}"))?;
    save(config)?;
    println!("✓ Reset {key} to default");
    Ok(())
}

fn save(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset config to defaults? Seeds and paths you set will be lost. (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
