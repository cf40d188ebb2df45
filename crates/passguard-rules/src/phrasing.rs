//! Message templates for count-style constraints.

use passguard_core::{Bounds, CountConstraint, Message};

/// Message keys for the five ways a violated count constraint is phrased.
///
/// Keys may carry `singular|plural` forms selected by `%count%`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Phrasing {
    pub at_least: &'static str,
    pub none: &'static str,
    pub at_most: &'static str,
    pub exactly: &'static str,
    pub between: &'static str,
}

impl Phrasing {
    pub(crate) fn message(&self, constraint: &CountConstraint) -> Message {
        match Bounds::of(constraint) {
            Some(Bounds::AtLeast(min)) => Message::new(self.at_least).count(u64::from(min)),
            Some(Bounds::AtMost(max)) => Message::new(self.at_most).count(u64::from(max)),
            Some(Bounds::Exactly(n)) => Message::new(self.exactly).count(u64::from(n)),
            Some(Bounds::Between(min, max)) => Message::new(self.between)
                .arg("%min%", min)
                .arg("%max%", max),
            Some(Bounds::NoneAllowed) | None => Message::new(self.none),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passguard_core::{EnglishTranslator, Translator};

    const THINGS: Phrasing = Phrasing {
        at_least: "At least one thing.|At least %count% things.",
        none: "No things.",
        at_most: "At most one thing.|At most %count% things.",
        exactly: "Exactly one thing.|Exactly %count% things.",
        between: "Between %min% and %max% things.",
    };

    fn phrase(min: u32, max: Option<u32>) -> String {
        let constraint = CountConstraint::count(min, max, 1).unwrap();
        EnglishTranslator.translate(&THINGS.message(&constraint))
    }

    #[test]
    fn follows_decision_table() {
        assert_eq!(phrase(1, None), "At least one thing.");
        assert_eq!(phrase(3, None), "At least 3 things.");
        assert_eq!(phrase(0, Some(0)), "No things.");
        assert_eq!(phrase(0, Some(1)), "At most one thing.");
        assert_eq!(phrase(0, Some(4)), "At most 4 things.");
        assert_eq!(phrase(2, Some(2)), "Exactly 2 things.");
        assert_eq!(phrase(2, Some(5)), "Between 2 and 5 things.");
    }
}
