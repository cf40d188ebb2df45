//! Integration test: a rule defined outside the library, built on
//! `WeightedRule`, evaluated end-to-end through `Evaluator`.

use passguard_core::formatter::{Capitalize, FormatterChain, LeetDecoder, WordFormatter};
use passguard_core::{
    Argon2Hasher, Bounds, CatalogTranslator, Config, CountConstraint, Evaluator, HashFunction,
    MemoryWordList, Message, Password, Rule, RuleError, ValidationError, Weight, WeightedRule,
    WordList,
};

/// Bounds the number of whitespace-separated words.
struct WordCount {
    constraints: WeightedRule<u32>,
}

impl WordCount {
    fn new(min: u32, max: Option<u32>, weight: Weight) -> Result<Self, RuleError> {
        Ok(Self {
            constraints: WeightedRule::with(CountConstraint::count(min, max, weight)?),
        })
    }

    fn words(password: &Password) -> u32 {
        u32::try_from(password.secret().split_whitespace().count()).unwrap_or(u32::MAX)
    }
}

impl Rule for WordCount {
    fn name(&self) -> &'static str {
        "word-count"
    }

    fn code(&self) -> &'static str {
        "X001"
    }

    fn test(&self, password: &Password, weight: Option<Weight>) -> Result<bool, RuleError> {
        Ok(self.constraints.test(Some(&Self::words(password)), weight))
    }

    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
        let words = Self::words(password);
        Ok(self.constraints.validate(self, password, Some(&words), |c| {
            match Bounds::of(c) {
                Some(Bounds::AtLeast(n)) => {
                    Message::new("Use at least one word.|Use at least %count% words.")
                        .count(u64::from(n))
                }
                _ => Message::new("Use a different number of words."),
            }
        }))
    }
}

fn passphrase_policy() -> Evaluator {
    let mut rule = WordCount::new(2, None, 2).unwrap();
    rule.constraints
        .add_constraint(CountConstraint::count(4, None, 0).unwrap());
    Evaluator::builder().rule(rule).build()
}

#[test]
fn weights_select_constraints() {
    let evaluator = passphrase_policy();
    let three_words = Password::new("correct horse battery");

    assert!(!evaluator.test(&three_words, None).unwrap());
    assert!(evaluator.test(&three_words, Some(1)).unwrap());
    assert!(!evaluator.test(&Password::new("single"), Some(1)).unwrap());
}

#[test]
fn report_carries_highest_weight_violation() {
    let evaluator = passphrase_policy();
    let report = evaluator.evaluate(&Password::new("single")).unwrap();

    assert_eq!(report.rules_checked, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].weight, 2);
    assert_eq!(report.errors[0].message, "Use at least 2 words.");
    assert!(report.at_weight(3).is_empty());
}

#[test]
fn report_renders_in_catalog_locale() {
    let translator = CatalogTranslator::new("nb").with(
        "Use at least one word.|Use at least %count% words.",
        "Bruk minst ett ord.|Bruk minst %count% ord.",
    );
    let report = passphrase_policy()
        .evaluate(&Password::new("single"))
        .unwrap();

    assert_eq!(report.messages(&translator), vec!["Bruk minst 2 ord."]);
}

#[test]
fn disabled_rule_is_skipped() {
    let config = Config::parse("[rules.word-count]\nenabled = false\n").unwrap();
    let evaluator = Evaluator::builder()
        .rule(WordCount::new(2, None, 1).unwrap())
        .config(config)
        .build();

    let report = evaluator.evaluate(&Password::new("single")).unwrap();
    assert!(report.is_valid());
    assert_eq!(report.rules_checked, 0);
}

#[test]
fn formatter_chain_finds_disguised_word() {
    let words = MemoryWordList::new(["Password"]);
    let chain = FormatterChain::new().then(LeetDecoder::new()).then(Capitalize);

    let found = chain
        .format("p4$$w0rd")
        .map(|variant| words.contains(&variant))
        .find(|hit| !matches!(hit, Ok(false)));
    assert!(matches!(found, Some(Ok(true))));
}

#[test]
fn argon2_compares_own_hashes() {
    let hasher = Argon2Hasher::new();
    let hash = hasher.hash("hunter2").unwrap();

    assert!(hash.starts_with("$argon2id$"));
    assert!(hasher.compare("hunter2", &hash).unwrap());
    assert!(!hasher.compare("hunter3", &hash).unwrap());
    assert!(!hasher.compare("hunter2", "plain text").unwrap());
}
