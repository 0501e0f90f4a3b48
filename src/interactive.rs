use crate::config::Config;
use crate::language::{self, LANGUAGES};
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::fs;
use std::path::{Path, PathBuf};

pub struct InteractiveResult {
    pub source_dir: PathBuf,
    pub config: Config,
}

pub fn run_interactive_wizard() -> anyhow::Result<InteractiveResult> {
    print_header();

    // Step 1: Check/Setup API Key
    let mut config = setup_api_key()?;

    // Step 2: Source directory
    let source_dir = select_source_directory()?;

    // Step 3: Target language
    let default_idx = LANGUAGES
        .iter()
        .position(|l| l.code == config.target_language)
        .unwrap_or(0);
    let target = select_language("Translate subtitles to:", default_idx)?;
    if target != config.target_language {
        config.output_suffix = None;
    }
    config.target_language = target;

    print_summary(&source_dir, &config);

    if !Confirm::new()
        .with_prompt("Proceed with these settings?")
        .default(true)
        .interact()?
    {
        anyhow::bail!("Cancelled by user");
    }

    println!();

    Ok(InteractiveResult { source_dir, config })
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║        srt-translate - Subtitle Translator        ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!();
}

fn setup_api_key() -> anyhow::Result<Config> {
    let mut config = Config::load().unwrap_or_default();

    if config.gemini_api_key.is_some() {
        println!("{} API key configured", style("✓").green());
        return Ok(config);
    }

    println!("{} Gemini API key not found", style("!").yellow());
    println!("  Get one at: https://aistudio.google.com/apikey\n");

    let api_key: String = Input::new()
        .with_prompt("Enter your Gemini API key")
        .interact_text()?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key is required");
    }

    config.gemini_api_key = Some(api_key.trim().to_string());

    // Offer to save
    if Confirm::new()
        .with_prompt("Save API key to config file?")
        .default(true)
        .interact()?
    {
        save_config(&config)?;
        println!("{} API key saved to config\n", style("✓").green());
    }

    Ok(config)
}

pub fn save_config(config: &Config) -> anyhow::Result<()> {
    if let Some(config_path) = Config::config_file_path() {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_content = toml::to_string_pretty(config)?;
        fs::write(config_path, toml_content)?;
    }
    Ok(())
}

fn select_source_directory() -> anyhow::Result<PathBuf> {
    println!("\n{}", style("Select source directory:").bold());

    let path: String = Input::new()
        .with_prompt("Directory containing .srt files")
        .default(".".to_string())
        .interact_text()?;

    // Existence is checked by the caller so both entry points report it alike.
    Ok(expand_home(path.trim()))
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn select_language(prompt: &str, default: usize) -> anyhow::Result<String> {
    let mut options: Vec<String> = LANGUAGES
        .iter()
        .map(|l| format!("{} ({})", l.name, l.code))
        .collect();
    options.push("Other (enter code)...".to_string());

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&options)
        .default(default)
        .interact()?;

    if selection == LANGUAGES.len() {
        let code: String = Input::new()
            .with_prompt("Enter language code (e.g., 'vi' for Vietnamese)")
            .interact_text()?;
        Ok(code.trim().to_lowercase())
    } else {
        Ok(LANGUAGES[selection].code.to_string())
    }
}

fn print_summary(source_dir: &Path, config: &Config) {
    println!("\n{}", style("═══ Summary ═══").bold());
    println!("  Directory:  {}", style(source_dir.display()).cyan());
    println!("  Translate:  → {}", get_language_name(&config.target_language));
    println!(
        "  Output:     *.{}.srt next to each source file",
        config.effective_output_suffix()
    );
    println!("  Chunk size: {} lines", config.chunk_size);
    if config.english_only {
        println!("  Inputs:     .en.srt only");
    }
    println!();
}

fn get_language_name(code: &str) -> String {
    language::find(code)
        .map(|l| format!("{} ({})", l.name, l.code))
        .unwrap_or_else(|| code.to_string())
}
