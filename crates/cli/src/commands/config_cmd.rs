//! `docscout config` — Configuration management commands.

use docscout_config::AppConfig;

pub async fn print_default() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", AppConfig::default_toml());
    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    print!("{}", config.to_redacted_toml()?);
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");
            if config.resolved_api_key().is_none() {
                println!(
                    "   ⚠️  No API key set (set {})",
                    docscout_config::credential_vars(&config.default_provider).join(" or ")
                );
            }
            println!();
            println!("   Provider:  {}", config.default_provider);
            println!("   Model:     {}", config.resolved_model());
            println!("   Tool:      {} (root marker: {})", config.lookup.tool, config.lookup.marker);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        return Ok(());
    }

    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("   Add your api_key there or set {}.", docscout_config::GENERIC_API_KEY_VAR);
    Ok(())
}

#[cfg(test)]
mod tests {
    use docscout_config::AppConfig;

    #[test]
    fn config_path_is_under_config_dir() {
        let path = AppConfig::config_path();
        assert!(path.starts_with(AppConfig::config_dir()));
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }

    #[test]
    fn default_toml_parses_back() {
        let parsed: AppConfig = toml_roundtrip(&AppConfig::default_toml());
        assert_eq!(parsed.lookup.marker, "go.mod");
    }

    fn toml_roundtrip(s: &str) -> AppConfig {
        let dir = std::env::temp_dir().join(format!("docscout-cli-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, s).unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        config
    }
}
