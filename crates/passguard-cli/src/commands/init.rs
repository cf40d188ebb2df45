//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# passguard configuration

# Rules enabled without a [rules.<name>] section:
# recommended (default), strict or minimal
preset = "recommended"

[evaluator]
# Skip rules whose word list, hasher or breach lookup fails instead of aborting
skip_failed_rules = false

# [messages]
# Translation catalog (TOML: locale + [messages] table)
# catalog = "messages.nb.toml"

# Rule configurations
# Constraints are checked highest weight first; `passguard check --weight W`
# ignores constraints weighing less than W.

[rules.length]
enabled = true
constraints = [
    { min = 8, weight = 1 },
    { min = 12, weight = 0 },
]

[rules.digit]
enabled = true
constraints = [{ min = 1 }]
# characters = "0123456789"

# [rules.symbol]
# characters = "!@#$%^&*"
# constraints = [{ min = 1 }]

# [rules.dictionary]
# word_list = "/usr/share/dict/words"
# case_sensitive = false
# candidates = "substrings"   # whole | tokens | substrings
# min_word_length = 4
# formatters = ["leetspeak", "leetspeak+capitalize"]

# [rules.have-i-been-pwned]
# constraints = [{ min = 0, max = 0 }]

# [rules.change-with-interval]
# Seconds since the last password change
# constraints = [{ min = 86400, max = 7776000 }]

# [rules.no-reuse]
# count = 5
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("passguard.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created passguard.toml");
    println!("\nNext steps:");
    println!("  1. Edit passguard.toml to configure rules");
    println!("  2. Run: passguard check");

    Ok(())
}
