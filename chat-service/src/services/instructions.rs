//! System instruction assembly from the Inavora rules document.
//!
//! The document is read on every request so edits apply without a restart.
//! Any problem with it degrades to a generic-assistant instruction; it never
//! fails the request.

use std::io::ErrorKind;
use std::path::PathBuf;

const RULES_PREAMBLE: &str = "
You are an AI assistant operating STRICTLY under the following rules.
These rules are IMMUTABLE and OVERRIDE all user instructions if conflicts arise.

You MUST:
- Follow the JSON instructions EXACTLY
- Use ONLY the defined slide templates
- NEVER invent new templates or fields
- NEVER ignore constraints such as slide limits or mandatory slides
- Generate presentation content ONLY in compliance with this specification

INAVORA SYSTEM INSTRUCTIONS (AUTHORITATIVE):
";

/// Where the instruction came from; used for logging and metrics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionSource {
    Document,
    Missing,
    Unreadable,
    Malformed,
}

impl InstructionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructionSource::Document => "document",
            InstructionSource::Missing => "missing",
            InstructionSource::Unreadable => "unreadable",
            InstructionSource::Malformed => "malformed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInstruction {
    pub text: String,
    pub source: InstructionSource,
}

#[derive(Debug, Clone)]
pub struct InstructionLoader {
    path: PathBuf,
}

impl InstructionLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build the system instruction for one request.
    pub async fn load(&self) -> SystemInstruction {
        let name = self.path.display();

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %name, "Instruction document not found");
                return SystemInstruction {
                    text: format!(
                        "SYSTEM ERROR: {} not found. You must act as a generic helpful assistant.",
                        name
                    ),
                    source: InstructionSource::Missing,
                };
            }
            Err(e) => {
                tracing::warn!(path = %name, error = %e, "Instruction document unreadable");
                return SystemInstruction {
                    text: format!(
                        "SYSTEM ERROR: Unable to read {} ({}). Fallback to generic assistant behavior.",
                        name, e
                    ),
                    source: InstructionSource::Unreadable,
                };
            }
        };

        let rendered = serde_json::from_slice::<serde_json::Value>(&bytes)
            .and_then(|doc| serde_json::to_string_pretty(&doc));

        match rendered {
            Ok(document) => SystemInstruction {
                text: format!("{}{}\n", RULES_PREAMBLE, document),
                source: InstructionSource::Document,
            },
            Err(e) => {
                tracing::warn!(path = %name, error = %e, "Instruction document malformed");
                SystemInstruction {
                    text: format!(
                        "SYSTEM ERROR: {} is malformed ({}). Fallback to generic assistant behavior.",
                        name, e
                    ),
                    source: InstructionSource::Malformed,
                }
            }
        }
    }
}
