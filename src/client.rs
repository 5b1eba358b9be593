//! Seam to the upstream language model.
//!
//! The model is a black box: one prompt in, free-form text out. Calls may
//! block and may fail; nothing here retries.

use anyhow::{Result, bail};

use crate::prompt::Prompt;

pub trait ModelClient {
    /// Provider name, for logging.
    fn name(&self) -> &str;

    fn complete(&self, prompt: &Prompt) -> Result<String>;
}

/// A client that always answers with the same text.
pub struct FixedClient {
    name: String,
    response: String,
}

impl FixedClient {
    pub fn new(name: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: response.into(),
        }
    }
}

impl ModelClient for FixedClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete(&self, _prompt: &Prompt) -> Result<String> {
        Ok(self.response.clone())
    }
}

/// Stand-in used when no provider credentials are configured.
pub struct Unconfigured;

impl ModelClient for Unconfigured {
    fn name(&self) -> &str {
        "none"
    }

    fn complete(&self, _prompt: &Prompt) -> Result<String> {
        bail!("No LLM provider configured")
    }
}

impl<C: ModelClient + ?Sized> ModelClient for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete(&self, prompt: &Prompt) -> Result<String> {
        (**self).complete(prompt)
    }
}
