use serde::{Deserialize, Serialize};

const WELCOME: &str = "You're welcome! Let me know if you need more help.";
const FAREWELL: &str = "Goodbye! Feel free to return anytime.";
const ACKNOWLEDGE: &str = "Alright! Let me know if you have more questions.";

/// One trigger phrase and the canned reply it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRule {
    pub trigger: String,
    pub reply: String,
}

impl ShortcutRule {
    pub fn new(trigger: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            reply: reply.into(),
        }
    }
}

/// Answers purely social messages without touching the pipeline.
///
/// Rules are checked in declaration order and a rule fires when its trigger
/// appears anywhere in the lower-cased, trimmed input. Matching is a plain
/// substring test, so "ok" also fires inside "token" or "book".
#[derive(Debug, Clone)]
pub struct ShortcutMatcher {
    rules: Vec<ShortcutRule>,
}

impl ShortcutMatcher {
    /// Triggers are lower-cased here; blank triggers are dropped since they
    /// would match everything.
    pub fn new(rules: impl IntoIterator<Item = ShortcutRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter_map(|rule| {
                let trigger = rule.trigger.trim().to_lowercase();
                (!trigger.is_empty()).then(|| ShortcutRule::new(trigger, rule.reply))
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[ShortcutRule] {
        &self.rules
    }

    pub fn reply_for(&self, input: &str) -> Option<&str> {
        let normalized = input.trim().to_lowercase();
        self.rules
            .iter()
            .find(|rule| normalized.contains(rule.trigger.as_str()))
            .map(|rule| rule.reply.as_str())
    }
}

impl Default for ShortcutMatcher {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

pub fn default_rules() -> Vec<ShortcutRule> {
    vec![
        ShortcutRule::new("thank you", WELCOME),
        ShortcutRule::new("bye", FAREWELL),
        ShortcutRule::new("thanks", WELCOME),
        ShortcutRule::new("goodbye", FAREWELL),
        ShortcutRule::new("ok", ACKNOWLEDGE),
        ShortcutRule::new("okay", ACKNOWLEDGE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_declared_trigger_wins() {
        let matcher = ShortcutMatcher::default();
        // "thanks" is declared before "ok"
        assert_eq!(matcher.reply_for("Ok thanks a lot"), Some(WELCOME));
        // "bye" is declared before "goodbye"
        assert_eq!(matcher.reply_for("Goodbye"), Some(FAREWELL));
    }

    #[test]
    fn test_case_and_whitespace_are_ignored() {
        let matcher = ShortcutMatcher::default();
        assert_eq!(matcher.reply_for("  THANK YOU!  "), Some(WELCOME));
        assert_eq!(matcher.reply_for("Okay"), Some(ACKNOWLEDGE));
    }

    #[test]
    fn test_no_trigger_returns_none() {
        let matcher = ShortcutMatcher::default();
        assert_eq!(matcher.reply_for("What is the capital of France?"), None);
        assert_eq!(matcher.reply_for(""), None);
    }

    #[test]
    fn test_substring_false_positive_is_kept() {
        let matcher = ShortcutMatcher::default();
        assert_eq!(
            matcher.reply_for("Which tokens does the page mention?"),
            Some(ACKNOWLEDGE)
        );
    }

    #[test]
    fn test_same_input_same_reply() {
        let matcher = ShortcutMatcher::default();
        assert_eq!(matcher.reply_for("bye now"), matcher.reply_for("bye now"));
    }

    #[test]
    fn test_configured_triggers_are_normalized() {
        let matcher = ShortcutMatcher::new([
            ShortcutRule::new("  Cheers ", "Cheers to you too!"),
            ShortcutRule::new("   ", "never"),
        ]);
        assert_eq!(matcher.rules().len(), 1);
        assert_eq!(matcher.reply_for("cheers mate"), Some("Cheers to you too!"));
    }
}
