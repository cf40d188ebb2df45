//! Rule construction from configuration.
//!
//! A rule is built when its preset includes it or the configuration has a
//! `[rules.<name>]` section for it, unless that section sets
//! `enabled = false`. Constraints given in the section replace the preset's;
//! without either, a rule-specific fallback applies.

use crate::presets::{Bound, Preset};
use crate::{
    character_class, change_interval, dictionary, have_i_been_pwned, length, lower_case,
    no_reuse, upper_case, Candidates, ChangeWithIntervalRule, DictionaryRule, DigitRule,
    HaveIBeenPwnedRule, LengthRule, LowerCaseRule, NoReuseRule, PwnedPasswordsClient,
    SymbolRule, UpperCaseRule,
};
use chrono::Duration;
use passguard_core::formatter;
use passguard_core::{
    Argon2Hasher, Config, ConstraintConfig, CountConstraint, IntervalConstraint,
    MemoryWordList, RuleBox, RuleConfig, RuleError, Weight, WeightedRule, DEFAULT_WEIGHT,
};
use std::path::Path;
use tracing::debug;

/// Static description of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Rule code (e.g., "PG001").
    pub code: &'static str,
    /// Rule name, also its `[rules.<name>]` config key.
    pub name: &'static str,
    /// Brief description.
    pub description: &'static str,
}

macro_rules! rule_info {
    ($module:ident) => {
        RuleInfo {
            code: $module::CODE,
            name: $module::NAME,
            description: $module::DESCRIPTION,
        }
    };
}

/// The built-in rules, in evaluation order.
pub const RULES: &[RuleInfo] = &[
    rule_info!(length),
    rule_info!(upper_case),
    rule_info!(lower_case),
    RuleInfo {
        code: character_class::DIGIT_CODE,
        name: character_class::DIGIT_NAME,
        description: character_class::DIGIT_DESCRIPTION,
    },
    RuleInfo {
        code: character_class::SYMBOL_CODE,
        name: character_class::SYMBOL_NAME,
        description: character_class::SYMBOL_DESCRIPTION,
    },
    rule_info!(dictionary),
    rule_info!(have_i_been_pwned),
    rule_info!(change_interval),
    rule_info!(no_reuse),
];

/// Builds the rules selected by a configuration.
///
/// # Errors
///
/// Returns [`RuleError::InvalidConfiguration`] for an unknown preset,
/// invalid bounds or options, or a word list that cannot be loaded.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, RuleError> {
    let preset = match config.preset.as_deref() {
        Some(name) => name.parse()?,
        None => Preset::default(),
    };

    for name in config.rules.keys() {
        if !RULES.iter().any(|info| info.name == name.as_str()) {
            tracing::warn!("Unknown rule in config: {}", name);
        }
    }

    let empty = RuleConfig::default();
    let mut rules = Vec::new();
    for RuleInfo { name, .. } in RULES {
        if !config.is_rule_enabled(name) {
            debug!("Rule {} disabled by config", name);
            continue;
        }
        let section = config.section(name);
        if section.is_none() && preset.bounds(name).is_none() {
            continue;
        }
        rules.extend(rule_from_config(name, section.unwrap_or(&empty), preset)?);
    }
    Ok(rules)
}

/// Builds one rule from its configuration section.
///
/// Returns `Ok(None)` for an unknown rule name.
///
/// # Errors
///
/// Returns [`RuleError::InvalidConfiguration`] for invalid bounds or options.
pub fn rule_from_config(
    name: &str,
    section: &RuleConfig,
    preset: Preset,
) -> Result<Option<RuleBox>, RuleError> {
    let rule: RuleBox = match name {
        length::NAME => Box::new(LengthRule::from_weighted(counts(
            name,
            section,
            preset,
            (8, None, DEFAULT_WEIGHT),
        )?)),
        upper_case::NAME => Box::new(UpperCaseRule::from_weighted(counts(
            name,
            section,
            preset,
            (1, None, DEFAULT_WEIGHT),
        )?)),
        lower_case::NAME => Box::new(LowerCaseRule::from_weighted(counts(
            name,
            section,
            preset,
            (1, None, DEFAULT_WEIGHT),
        )?)),
        character_class::DIGIT_NAME => Box::new(DigitRule::from_weighted(
            section.get_str("characters", character_class::DEFAULT_DIGITS),
            counts(name, section, preset, (1, None, DEFAULT_WEIGHT))?,
        )?),
        character_class::SYMBOL_NAME => Box::new(SymbolRule::from_weighted(
            section.get_str("characters", character_class::DEFAULT_SYMBOLS),
            counts(name, section, preset, (1, None, DEFAULT_WEIGHT))?,
        )?),
        dictionary::NAME => Box::new(dictionary_from_config(section)?),
        have_i_been_pwned::NAME => {
            let mut client = PwnedPasswordsClient::new()
                .map_err(|e| RuleError::invalid(format!("{name}: {e}")))?;
            if let Some(url) = section.get_option::<String>("api_url") {
                client = client.api_url(url);
            }
            Box::new(HaveIBeenPwnedRule::from_weighted(
                Box::new(client),
                counts(name, section, preset, (0, Some(0), DEFAULT_WEIGHT))?,
            ))
        }
        change_interval::NAME => {
            Box::new(ChangeWithIntervalRule::from_weighted(intervals(name, section)?))
        }
        no_reuse::NAME => {
            let count = match section.get_option::<i64>("count") {
                Some(count) => Some(positive(name, "count", count)?),
                None => None,
            };
            let first = positive(name, "first", section.get_int("first", 1))?;
            let rule = NoReuseRule::new(Argon2Hasher::new(), count, first)?;
            Box::new(rule.weight(weight(name, section)?))
        }
        _ => return Ok(None),
    };
    Ok(Some(rule))
}

fn dictionary_from_config(section: &RuleConfig) -> Result<DictionaryRule, RuleError> {
    let name = dictionary::NAME;
    let path = section
        .get_option::<String>("word_list")
        .ok_or_else(|| RuleError::invalid(format!("{name}: word_list is required")))?;
    let mut words = MemoryWordList::from_file(Path::new(&path))
        .map_err(|e| RuleError::invalid(format!("{name}: {e}")))?;
    if !section.get_bool("case_sensitive", true) {
        words = words.case_insensitive();
    }

    let min_length = positive(name, "min_word_length", section.get_int("min_word_length", 3))?;
    let max_length = match section.get_option::<i64>("max_word_length") {
        Some(max) => Some(positive(name, "max_word_length", max)?),
        None => None,
    };
    let candidates = match section.get_str("candidates", "whole") {
        "whole" => Candidates::WholePassword,
        "tokens" => Candidates::Tokens,
        "substrings" => Candidates::Substrings {
            min_length,
            max_length,
        },
        other => {
            return Err(RuleError::invalid(format!(
                "{name}: unknown candidates mode {other:?}"
            )))
        }
    };

    let mut rule = DictionaryRule::new(words)
        .candidates(candidates)
        .weight(weight(name, section)?);
    for entry in section.get_str_array("formatters") {
        let stage = formatter::from_name(&entry)
            .ok_or_else(|| RuleError::invalid(format!("{name}: unknown formatter {entry:?}")))?;
        rule = rule.formatter_box(stage);
    }
    Ok(rule)
}

/// Count constraints from the section, else the preset, else `fallback`.
fn counts(
    name: &str,
    section: &RuleConfig,
    preset: Preset,
    fallback: Bound,
) -> Result<WeightedRule<u32>, RuleError> {
    let bounds = if section.constraints.is_empty() {
        preset.bounds(name).unwrap_or_else(|| vec![fallback])
    } else {
        section
            .constraints
            .iter()
            .map(|c| count_bound(name, c))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut rule = WeightedRule::new();
    for (min, max, weight) in bounds {
        rule.add_constraint(CountConstraint::count(min, max, weight)?);
    }
    Ok(rule)
}

fn count_bound(name: &str, c: &ConstraintConfig) -> Result<Bound, RuleError> {
    let to_u32 = |v: i64| {
        u32::try_from(v).map_err(|_| RuleError::invalid(format!("{name}: bound {v} out of range")))
    };
    let min = to_u32(c.min.unwrap_or(0))?;
    let max = c.max.map(to_u32).transpose()?;
    Ok((min, max, c.weight))
}

/// Interval constraints in seconds; the section must give at least one.
fn intervals(name: &str, section: &RuleConfig) -> Result<WeightedRule<Duration>, RuleError> {
    if section.constraints.is_empty() {
        return Err(RuleError::invalid(format!("{name}: constraints are required")));
    }
    let mut rule = WeightedRule::new();
    let seconds = |v: i64| {
        Duration::try_seconds(v)
            .ok_or_else(|| RuleError::invalid(format!("{name}: bound {v} out of range")))
    };
    for c in &section.constraints {
        let min = seconds(c.min.unwrap_or(0))?;
        let max = c.max.map(seconds).transpose()?;
        rule.add_constraint(IntervalConstraint::interval(min, max, c.weight)?);
    }
    Ok(rule)
}

fn weight(name: &str, section: &RuleConfig) -> Result<Weight, RuleError> {
    let value = section.get_int("weight", i64::from(DEFAULT_WEIGHT));
    Weight::try_from(value)
        .map_err(|_| RuleError::invalid(format!("{name}: weight {value} out of range")))
}

fn positive(name: &str, option: &str, value: i64) -> Result<usize, RuleError> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| RuleError::invalid(format!("{name}: {option} must be positive")))
}
