//! Prompt composition for the three assistant capabilities
//!
//! This module holds the shared persona instruction and the task-specific
//! prompt builders for analysis narration and content generation. Composition
//! is pure string assembly: no builder mutates or inspects model output.
//!
//! The persona block travels as a standing system instruction on every call
//! path (chat session creation included); it is never repeated inside the
//! user payload.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared persona/style instruction for every call path.
///
/// Threaded explicitly through [`crate::gateway::Gateway`] and the config
/// layer rather than read from ambient global state.
pub const DEFAULT_PERSONA: &str = "\
You are FREY, a multifunctional AI assistant.
Your style is professional, warm, pedagogical, and inspiring. Your goal is to
simplify the user's life, answer quickly, and produce high-quality content.
You are clear, fluent, friendly, and precise.

MANDATORY RESPONSE RULES:
1. Structure: always provide a clear, detailed answer using headings and
   short, scannable paragraphs.
2. Closing: ALWAYS end your response with two bold sections:
   - **Summary:** [a one-sentence synthesis of your answer.]
   - **Suggestion:** [one concrete action or avenue based on the answer.]
3. Ambiguity: if the question is unclear, rephrase it before answering.
4. Content: never answer \"I don't know\"; always offer a logical
   explanation or a lead.";

/// Writing tone for content generation
///
/// The set is closed: out-of-range values are unrepresentable both on the
/// CLI (`ValueEnum`) and on the wire (lowercase serde).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Polished, business-appropriate register
    Professional,
    /// Warm and approachable register
    Friendly,
    /// Light and witty register
    Humorous,
    /// Uplifting, motivational register
    Inspiring,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Professional => write!(f, "professional"),
            Self::Friendly => write!(f, "friendly"),
            Self::Humorous => write!(f, "humorous"),
            Self::Inspiring => write!(f, "inspiring"),
        }
    }
}

/// Builds the analysis-narration prompt from a raw summary report
///
/// The composed prompt instructs the model to describe general trends,
/// surface one key insight, and close with the fixed two-part structure
/// the persona mandates.
///
/// # Examples
///
/// ```
/// use frey::prompts::build_analysis_prompt;
///
/// let prompt = build_analysis_prompt("Dimensions: 2 rows and 2 columns.");
/// assert!(prompt.contains("Dimensions: 2 rows and 2 columns."));
/// assert!(prompt.contains("key insight"));
/// ```
pub fn build_analysis_prompt(raw_report: &str) -> String {
    format!(
        "Your mission is to turn the following raw data analysis into a \
readable, pedagogical, and inspiring report.\n\
\n\
Your response must:\n\
1. Describe the general trends (dimensions, main statistics).\n\
2. Identify one key insight (anomaly, top value, implicit correlation).\n\
3. STRICTLY follow the closing structure: clear answer + **Summary** + \
**Suggestion**.\n\
\n\
Here are the raw analysis results:\n\
---\n\
{}\n\
---",
        raw_report
    )
}

/// Builds the content-generation prompt for a subject and tone
///
/// # Examples
///
/// ```
/// use frey::prompts::{build_content_prompt, Tone};
///
/// let prompt = build_content_prompt("product launch email", Tone::Friendly);
/// assert!(prompt.contains("product launch email"));
/// assert!(prompt.contains("friendly"));
/// ```
pub fn build_content_prompt(subject: &str, tone: Tone) -> String {
    format!(
        "Objective: write a fluent, relevant, professional-quality text on \
the following subject, adopting a **{}** tone. Close with the mandatory \
**Summary** and **Suggestion** sections.\n\
\n\
Subject: \"{}\"",
        tone, subject
    )
}
