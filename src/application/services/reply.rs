use serde::Serialize;

use crate::domain::DomainError;

pub const DEFAULT_EMPTY_ANSWER: &str =
    "I'm here to assist you! Let me know if you have more questions.";
pub const DEFAULT_APOLOGY: &str =
    "I'm sorry, I couldn't understand that. Please try rephrasing your question.";

/// How the text of an assistant turn was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Shortcut,
    Generated,
    EmptyFallback,
    Apology,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,
}

impl Reply {
    pub fn new(text: impl Into<String>, kind: ReplyKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Maps a pipeline outcome to the text shown to the user.
///
/// A blank answer becomes the encouraging fallback and any error becomes the
/// apology; raw error text never reaches the reply.
#[derive(Debug, Clone)]
pub struct ReplyPolicy {
    empty_answer: String,
    apology: String,
}

impl ReplyPolicy {
    pub fn new(empty_answer: impl Into<String>, apology: impl Into<String>) -> Self {
        Self {
            empty_answer: empty_answer.into(),
            apology: apology.into(),
        }
    }

    pub fn resolve(&self, outcome: Result<String, DomainError>) -> Reply {
        match outcome {
            Ok(text) if text.trim().is_empty() => {
                tracing::debug!("generation returned no text, using fallback");
                Reply::new(self.empty_answer.clone(), ReplyKind::EmptyFallback)
            }
            Ok(text) => Reply::new(text, ReplyKind::Generated),
            Err(e) => {
                tracing::warn!(error = %e, "answer pipeline failed");
                Reply::new(self.apology.clone(), ReplyKind::Apology)
            }
        }
    }
}

impl Default for ReplyPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EMPTY_ANSWER, DEFAULT_APOLOGY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_text_passes_through() {
        let reply = ReplyPolicy::default().resolve(Ok("Paris.".into()));
        assert_eq!(reply, Reply::new("Paris.", ReplyKind::Generated));
    }

    #[test]
    fn test_blank_text_uses_fallback() {
        let reply = ReplyPolicy::default().resolve(Ok(" \n\t".into()));
        assert_eq!(reply.kind, ReplyKind::EmptyFallback);
        assert_eq!(reply.text, DEFAULT_EMPTY_ANSWER);
    }

    #[test]
    fn test_every_error_kind_uses_apology() {
        let policy = ReplyPolicy::default();
        for err in [
            DomainError::retrieval("index gone"),
            DomainError::generation("quota exceeded"),
            DomainError::timeout("llm"),
        ] {
            let reply = policy.resolve(Err(err));
            assert_eq!(reply.kind, ReplyKind::Apology);
            assert_eq!(reply.text, DEFAULT_APOLOGY);
        }
    }

    #[test]
    fn test_custom_texts() {
        let policy = ReplyPolicy::new("empty", "sorry");
        assert_eq!(policy.resolve(Ok(String::new())).text, "empty");
        assert_eq!(policy.resolve(Err(DomainError::internal("x"))).text, "sorry");
    }
}
