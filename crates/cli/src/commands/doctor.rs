//! `docscout doctor` — Diagnose configuration and toolchain.

use docscout_config::AppConfig;
use tokio::process::Command;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 docscout Doctor — System Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    // Config
    let config_path = AppConfig::config_path();
    if config_path.exists() {
        println!("  ✅ Config file: {}", config_path.display());
    } else {
        println!("  ℹ️  No config file at {} (using defaults)", config_path.display());
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    // Credential and reachability
    match docscout_providers::build_provider(&config) {
        Ok(provider) => {
            if config.resolved_api_key().is_some() {
                println!("  ✅ API key configured for '{}'", config.default_provider);
            } else {
                println!("  ✅ Provider '{}' needs no API key", config.default_provider);
            }
            match provider.health_check().await {
                Ok(true) => println!("  ✅ Backend reachable"),
                Ok(false) => {
                    println!("  ⚠️  Backend answered but rejected the health check");
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Backend unreachable: {e}");
                    issues += 1;
                }
            }
        }
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    // Lookup tool
    match Command::new(&config.lookup.tool).arg("version").output().await {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("  ✅ {} found: {}", config.lookup.tool, version.trim());
        }
        Ok(output) => {
            println!(
                "  ⚠️  `{} version` exited with {}",
                config.lookup.tool, output.status
            );
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ `{}` not runnable: {e}", config.lookup.tool);
            issues += 1;
        }
    }

    println!();
    println!("   Provider:  {}", config.default_provider);
    println!("   Model:     {}", config.resolved_model());
    println!("   Timeout:   {}s per lookup", config.lookup.timeout_secs);
    println!("   Failures:  {:?}", config.lookup.failure_policy);

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
