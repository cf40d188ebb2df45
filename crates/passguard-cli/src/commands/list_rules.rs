//! List rules command implementation.

use passguard_rules::RULES;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in RULES {
        println!("{:<10} {:<25} {}", rule.code, rule.name, rule.description);
    }

    println!("\nPresets:");
    println!("  recommended  - PG001 (8+, 12+ at weight 0), PG002, PG003, PG004 (default)");
    println!("  strict       - PG001 (12+ at weight 2, 16+ at weight 0), PG002-PG005");
    println!("  minimal      - PG001 (8+) only");

    println!("\nRules without a preset entry need a [rules.<name>] section, e.g.:");
    println!("  [rules.dictionary]");
    println!("  word_list = \"/usr/share/dict/words\"");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  passguard check --rules length,digit");
    println!("  passguard check --rules PG001,PG004");
}
