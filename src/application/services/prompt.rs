use crate::domain::DomainError;

pub const CONTEXT_PLACEHOLDER: &str = "{context}";
pub const QUESTION_PLACEHOLDER: &str = "{question}";

pub const DEFAULT_TEMPLATE: &str =
    "Answer the question based only on the following context:\n{context}\n\nQuestion: {question}\n";

/// Renders retrieved context and a question into one generation request.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    template: String,
}

impl PromptComposer {
    pub fn new(template: impl Into<String>) -> Result<Self, DomainError> {
        let template = template.into();
        for placeholder in [CONTEXT_PLACEHOLDER, QUESTION_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(DomainError::validation(format!(
                    "prompt template is missing {placeholder}"
                )));
            }
        }
        Ok(Self { template })
    }

    /// Joins `context` in the given order and fills both placeholders.
    ///
    /// Placeholders are substituted in the template only, so braces inside
    /// the page text or the question are left alone.
    pub fn compose(&self, context: &[&str], question: &str) -> String {
        let context = context.join("\n\n");
        self.template
            .split(CONTEXT_PLACEHOLDER)
            .map(|part| part.replace(QUESTION_PLACEHOLDER, question))
            .collect::<Vec<_>>()
            .join(&context)
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}
