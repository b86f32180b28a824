use super::AppContext;
use crate::output::Output;
use crate::ConfigCommands;
use cinescope_config::{Config, PathManager};
use cinescope_core::DiscoverOptions;
use cinescope_models::ImageSize;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, api_url: Option<&str>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, api_url, output),
        ConfigCommands::Set {
            backend_url,
            image_base_url,
            poster_size,
        } => set_config(backend_url, image_base_url, poster_size, output),
    }
}

fn show_config(full: bool, api_url: Option<&str>, output: &Output) -> Result<()> {
    let ctx = AppContext::load(api_url)?;
    let config = &ctx.config;
    let config_file = ctx.paths.config_file();
    let token = ctx.session.token().unwrap_or_default();
    let token_display = if full { token.clone() } else { mask_string(&token) };
    let user = ctx.session.user().map(|u| u.display_name().to_string());
    let years = DiscoverOptions::from_config(&config.discover).years;

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "api": {
                "base_url": config.api.base_url,
                "timeout_seconds": config.api.timeout_seconds,
            },
            "images": {
                "base_url": config.images.base_url,
                "poster_size": config.images.poster_size,
                "grid_size": config.images.grid_size,
                "backdrop_size": config.images.backdrop_size,
            },
            "discover": {
                "genres": config.discover.genres,
                "years": years,
            },
            "session": {
                "signed_in": ctx.session.is_authenticated(),
                "user": user,
                "token": token_display,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    output.println(format!("\n{}", "Configuration".bright_cyan().bold()));
    if !config_file.exists() {
        output.println(format!(
            "{}",
            format!("No file at {}, showing defaults", config_file.display()).bright_black()
        ));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display())]);
    table.add_row(vec![Cell::new("API Base URL"), Cell::new(&config.api.base_url)]);
    table.add_row(vec![Cell::new("Request Timeout"), Cell::new(format!("{}s", config.api.timeout_seconds))]);
    table.add_row(vec![Cell::new("Image Base URL"), Cell::new(&config.images.base_url)]);
    table.add_row(vec![Cell::new("Poster Size"), Cell::new(config.images.poster_size)]);
    table.add_row(vec![Cell::new("Grid Size"), Cell::new(config.images.grid_size)]);
    table.add_row(vec![Cell::new("Backdrop Size"), Cell::new(config.images.backdrop_size)]);
    table.add_row(vec![Cell::new("Genres"), Cell::new(config.discover.genres.join(", "))]);
    table.add_row(vec![Cell::new("Years"), Cell::new(year_range(&years))]);
    table.add_row(vec![
        Cell::new("Signed In"),
        Cell::new(match &user {
            Some(name) => format!("{} {}", "✓".green(), name),
            None if ctx.session.is_authenticated() => "✓".green().to_string(),
            None => "✗".red().to_string(),
        }),
    ]);
    table.add_row(vec![Cell::new("Session Token"), Cell::new(token_display)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.println(table.to_string());

    Ok(())
}

fn set_config(
    backend_url: Option<String>,
    image_base_url: Option<String>,
    poster_size: Option<ImageSize>,
    output: &Output,
) -> Result<()> {
    if backend_url.is_none() && image_base_url.is_none() && poster_size.is_none() {
        output.warn("Nothing to change. Use --backend-url, --image-base-url or --poster-size");
        return Ok(());
    }

    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    apply_settings(&mut config, backend_url, image_base_url, poster_size)?;

    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    tracing::info!(path = %config_file.display(), "Configuration saved");
    output.success(format!("Configuration saved to {}", config_file.display()));
    Ok(())
}

/// Apply the given changes and reject the result if it no longer validates
fn apply_settings(
    config: &mut Config,
    backend_url: Option<String>,
    image_base_url: Option<String>,
    poster_size: Option<ImageSize>,
) -> Result<()> {
    if let Some(url) = backend_url {
        config.api.base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(url) = image_base_url {
        config.images.base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(size) = poster_size {
        config.images.poster_size = size;
    }

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))
}

fn year_range(years: &[u32]) -> String {
    match (years.last(), years.first()) {
        (Some(oldest), Some(newest)) => format!("{} - {}", oldest, newest),
        _ => String::new(),
    }
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("short"), "*****");
        assert_eq!(mask_string("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJh***load");
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Config::default();
        apply_settings(
            &mut config,
            Some(" http://localhost:5000/ ".to_string()),
            None,
            Some(ImageSize::Original),
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.images.poster_size, ImageSize::Original);
        assert_eq!(config.images.base_url, Config::default().images.base_url);
    }

    #[test]
    fn test_apply_settings_rejects_bad_url() {
        let mut config = Config::default();
        let result = apply_settings(&mut config, Some("localhost:5000".to_string()), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_saved_settings_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        apply_settings(&mut config, None, Some("https://cdn.example.com/t/p".to_string()), None).unwrap();
        config.save_to_file(&path).unwrap();

        let reloaded = Config::load_from_file(&path).unwrap();
        assert_eq!(reloaded.images.base_url, "https://cdn.example.com/t/p");
    }

    #[test]
    fn test_year_range() {
        assert_eq!(year_range(&[2025, 2024, 2006]), "2006 - 2025");
        assert_eq!(year_range(&[]), "");
    }
}
