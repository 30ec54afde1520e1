// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM integrations.

use async_trait::async_trait;

use crate::error::DatapilotError;

/// Adapter for the language-model collaborator.
///
/// The pipeline treats the model as an opaque function from prompt text to
/// completion text. No streaming is consumed by the core; each call is
/// awaited to completion before the step proceeds.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Sends a prompt and returns the full completion text.
    async fn complete(&self, prompt: &str) -> Result<String, DatapilotError>;
}
