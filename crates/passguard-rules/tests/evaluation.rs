//! Integration test: built-in rules evaluated end-to-end via Evaluator,
//! constructed both directly and from TOML policies.

use chrono::{Duration, TimeZone, Utc};
use passguard_core::formatter::{FormatterChain, LeetDecoder, LowerCase};
use passguard_core::{
    Argon2Hasher, Config, Evaluator, FormerPassword, HashFunction, MemoryWordList, Password,
    WordList, WordListError,
};
use passguard_rules::{
    rules_from_config, Candidates, ChangeWithIntervalRule, DictionaryRule, LengthRule,
    NoReuseRule, UpperCaseRule,
};
use std::io::Write;

struct Offline;

impl WordList for Offline {
    fn contains(&self, _: &str) -> Result<bool, WordListError> {
        Err(WordListError::Unavailable("dictionary service offline".into()))
    }
}

fn evaluator_from_toml(toml: &str) -> Evaluator {
    let config = Config::parse(toml).expect("fixture config should parse");
    let rules = rules_from_config(&config).expect("fixture rules should build");
    Evaluator::builder().rules(rules).config(config).build()
}

// ── Scalar rules ──

#[test]
fn length_rule_end_to_end() {
    let evaluator = Evaluator::builder()
        .rule(LengthRule::new(8, None).unwrap())
        .build();

    let report = evaluator.evaluate(&Password::new("short")).unwrap();
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].code, "PG001");
    assert_eq!(report.errors[0].message, "There must be at least 8 characters.");

    assert!(evaluator.evaluate(&Password::new("longenough")).unwrap().is_valid());
}

#[test]
fn upper_case_threshold_end_to_end() {
    let mut rule = UpperCaseRule::with_weight(0, Some(0), 1).unwrap();
    rule.add_constraint(0, Some(3), 2).unwrap();
    let evaluator = Evaluator::builder().rule(rule).build();

    assert!(evaluator.test(&Password::new("ABC"), Some(2)).unwrap());
    assert!(!evaluator.test(&Password::new("ABCD"), Some(2)).unwrap());
    assert!(!evaluator.test(&Password::new("ABC"), None).unwrap());

    // The highest-weight violated constraint is reported.
    let report = evaluator.evaluate(&Password::new("ABCD")).unwrap();
    assert_eq!(report.errors[0].weight, 2);
}

// ── Dictionary ──

#[test]
fn dictionary_catches_disguised_words() {
    let evaluator = Evaluator::builder()
        .rule(
            DictionaryRule::new(MemoryWordList::new(["password", "dragon"]))
                .formatter(FormatterChain::new().then(LowerCase).then(LeetDecoder::new()))
                .candidates(Candidates::Substrings {
                    min_length: 4,
                    max_length: None,
                }),
        )
        .build();

    let report = evaluator.evaluate(&Password::new("xxDRAGON!!")).unwrap();
    assert_eq!(report.errors[0].matched.as_deref(), Some("DRAGON"));

    let report = evaluator.evaluate(&Password::new("my P4$$w0rd")).unwrap();
    assert_eq!(report.errors.len(), 1);

    assert!(evaluator.evaluate(&Password::new("tr0ub4dor&3")).unwrap().is_valid());
}

#[test]
fn unavailable_word_list_fails_or_is_skipped() {
    let strict = Evaluator::builder()
        .rule(DictionaryRule::new(Offline))
        .rule(LengthRule::new(8, None).unwrap())
        .build();
    assert!(strict.evaluate(&Password::new("short")).is_err());

    let lenient = Evaluator::builder()
        .rule(DictionaryRule::new(Offline))
        .rule(LengthRule::new(8, None).unwrap())
        .skip_failed_rules(true)
        .build();
    let report = lenient.evaluate(&Password::new("short")).unwrap();
    assert_eq!(report.rules_failed, vec!["dictionary"]);
    assert_eq!(report.rules_checked, 1);
    assert_eq!(report.errors[0].rule, "length");
}

// ── History rules ──

#[test]
fn history_rules_end_to_end() {
    let hasher = Argon2Hasher::new();
    let changed = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let history = vec![
        FormerPassword::new(hasher.hash("autumn-2023").unwrap(), changed),
        FormerPassword::new(
            hasher.hash("spring-2023").unwrap(),
            changed - Duration::weeks(26),
        ),
    ];

    let evaluator = Evaluator::builder()
        .rule(NoReuseRule::new(Argon2Hasher::new(), Some(2), 1).unwrap())
        .rule(
            ChangeWithIntervalRule::new(Duration::days(1), None)
                .unwrap()
                .at(changed + Duration::hours(2)),
        )
        .build();

    let reused = Password::new("spring-2023").with_former_passwords(history);
    let report = evaluator.evaluate(&reused).unwrap();
    let rules: Vec<&str> = report.errors.iter().map(|e| e.rule.as_str()).collect();
    assert_eq!(rules, vec!["no-reuse", "change-with-interval"]);
    assert_eq!(
        report.errors[1].message,
        "There must be at least 1 day between password changes."
    );

    let fresh = Password::new("winter-2024");
    assert!(evaluator.evaluate(&fresh).unwrap().is_valid());
}

// ── Configuration ──

#[test]
fn preset_policy_from_toml() {
    let evaluator = evaluator_from_toml("preset = \"strict\"\n");
    let names: Vec<&str> = evaluator.rules().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["length", "upper-case", "lower-case", "digit", "symbol"]);

    let report = evaluator.evaluate(&Password::new("Abcdefghijk1")).unwrap();
    let codes: Vec<&str> = report.errors.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["PG001", "PG005"]);
    assert_eq!(report.at_weight(2).len(), 0);
    assert!(evaluator.test(&Password::new("Abcdefghijk1!"), Some(1)).unwrap());
}

#[test]
fn dictionary_policy_from_toml() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("words.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "monkey\nsunshine").unwrap();

    let toml = format!(
        r#"
preset = "minimal"

[rules.dictionary]
word_list = "{}"
case_sensitive = false
candidates = "substrings"
min_word_length = 5
formatters = ["leetspeak"]
weight = 3
"#,
        path.display()
    );
    let evaluator = evaluator_from_toml(&toml);

    let report = evaluator.evaluate(&Password::new("xxSUN5H1NExx")).unwrap();
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].rule, "dictionary");
    assert_eq!(report.errors[0].weight, 3);
    assert_eq!(report.errors[0].matched.as_deref(), Some("SUN5H1NE"));
}

#[test]
fn disabled_rule_in_toml() {
    let evaluator = evaluator_from_toml(
        r#"
[rules.digit]
enabled = false
"#,
    );
    let names: Vec<&str> = evaluator.rules().iter().map(|r| r.name()).collect();
    assert!(!names.contains(&"digit"));
    assert!(evaluator.test(&Password::new("Abcdefghijkl"), None).unwrap());
}
