//! Check command implementation.

use anyhow::{Context, Result};
use passguard_core::{
    CatalogTranslator, Config, Evaluator, FormerPassword, Password, RuleBox, RuleConfig,
    ValidationReport, Weight,
};
use passguard_rules::{rule_from_config, rules_from_config, Preset, RULES};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of the check command.
pub struct CheckOptions {
    /// Password given on the command line.
    pub password: Option<String>,
    /// Former passwords file.
    pub history: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules: Option<String>,
    /// Minimum weight of reported violations.
    pub weight: Option<Weight>,
}

/// Runs the check command.
pub fn run(options: CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;

    let rules = match &options.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(&config, &names)?
        }
        None => rules_from_config(&config).context("Failed to build rules")?,
    };

    let evaluator = Evaluator::builder()
        .rules(rules)
        .config(config.clone())
        .build();

    let mut password = Password::new(read_password(options.password)?);
    if let Some(path) = &options.history {
        password = password.with_former_passwords(load_history(path)?);
    }

    tracing::info!("Checking password with {} rules", evaluator.rule_count());

    let mut report = evaluator.evaluate(&password).context("Evaluation failed")?;

    if let Some(weight) = options.weight {
        report.errors.retain(|e| e.weight >= weight);
    }

    translate(&mut report, &config)?;

    super::output::print(&report, options.format)?;

    // Exit with error code if there are violations
    if !report.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    if let Some(path) = source.path().filter(|_| source.is_global()) {
        tracing::info!("Using global config: {}", path.display());
    }
    source.load().context("Failed to load config")
}

fn translate(report: &mut ValidationReport, config: &Config) -> Result<()> {
    let Some(path) = &config.messages.catalog else {
        return Ok(());
    };
    let translator = CatalogTranslator::from_file(path)
        .with_context(|| format!("Failed to load message catalog: {}", path.display()))?;
    for error in &mut report.errors {
        error.message = error.render(&translator);
    }
    Ok(())
}

fn filter_rules(config: &Config, names: &[&str]) -> Result<Vec<RuleBox>> {
    let preset = match config.preset.as_deref() {
        Some(name) => name.parse().context("Invalid preset")?,
        None => Preset::default(),
    };
    let empty = RuleConfig::default();
    let mut rules = Vec::new();

    for name in names {
        let Some(info) = RULES.iter().find(|r| r.name == *name || r.code == *name) else {
            tracing::warn!("Unknown rule: {}", name);
            continue;
        };
        let section = config.section(info.name).unwrap_or(&empty);
        let rule = rule_from_config(info.name, section, preset)
            .with_context(|| format!("Failed to build rule {}", info.name))?;
        rules.extend(rule);
    }

    Ok(rules)
}

fn read_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn load_history(path: &Path) -> Result<Vec<FormerPassword>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn filter_accepts_names_and_codes() {
        let rules = filter_rules(&Config::default(), &["length", "PG005", "nope"]).unwrap();
        assert_eq!(names(&rules), vec!["length", "symbol"]);
    }

    #[test]
    fn filter_uses_configured_section() {
        let config = Config::parse(
            r#"
[rules.length]
constraints = [{ min = 20 }]
"#,
        )
        .unwrap();
        let rules = filter_rules(&config, &["length"]).unwrap();
        assert!(!rules[0].test(&Password::new("short password"), None).unwrap());
    }

    #[test]
    fn load_history_parses_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        fs::write(
            &path,
            r#"[
                {"hash": "old", "date": "2020-01-01T00:00:00Z"},
                {"hash": "newer", "date": "2021-01-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();

        let history = load_history(&path).unwrap();
        let password = Password::new("secret").with_former_passwords(history);
        assert_eq!(password.last_change().unwrap().hash, "newer");
    }

    #[test]
    fn load_config_defaults_without_source() {
        let config = load_config(&ConfigSource::Default).unwrap();
        assert!(config.preset.is_none());
    }

    #[test]
    fn catalog_next_to_global_policy() {
        let home = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        fs::write(
            home.path().join("config.toml"),
            "[messages]\ncatalog = \"messages.nb.toml\"\n\n\
             [rules.length]\nconstraints = [{ min = 8 }]\n",
        )
        .unwrap();
        fs::write(
            home.path().join("messages.nb.toml"),
            r#"
locale = "nb"
[messages]
"There must be at least one character.|There must be at least %count% characters." = "Minst ett tegn.|Minst %count% tegn."
"#,
        )
        .unwrap();

        // Relative catalog paths must not depend on the working directory.
        let source = crate::config_resolver::locate(work.path(), None, Some(home.path()));
        assert!(source.is_global());
        let config = load_config(&source).unwrap();

        let rules = filter_rules(&config, &["length"]).unwrap();
        let mut report = Evaluator::builder()
            .rules(rules)
            .build()
            .evaluate(&Password::new("short"))
            .unwrap();
        translate(&mut report, &config).unwrap();
        assert_eq!(report.errors[0].message, "Minst 8 tegn.");
    }

    #[test]
    fn missing_catalog_is_reported() {
        let mut config = Config::default();
        config.messages.catalog = Some(PathBuf::from("/nonexistent/messages.toml"));
        let error = translate(&mut ValidationReport::new(), &config).unwrap_err();
        assert!(error.to_string().contains("Failed to load message catalog"));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let source = ConfigSource::Explicit(PathBuf::from("/nonexistent/passguard.toml"));
        assert!(load_config(&source).is_err());
    }
}
