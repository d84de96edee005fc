//! Prompt builders for the medical assistant flows

/// System role for keyword extraction.
pub const EXTRACTION_SYSTEM: &str =
    "You are an AI medical assistant extracting relevant symptoms or conditions.";

/// System role for structured analysis.
pub const ANALYSIS_SYSTEM: &str =
    "You are an AI medical assistant providing structured medical advice.";

/// Prompt asking for the medical keywords mentioned in a transcript.
pub fn extraction_prompt(transcription: &str) -> String {
    format!(
        "Extract the key medical symptoms or conditions from the following \
doctor-patient conversation:

\"{transcription}\"

Return a list of medical symptoms, conditions, or issues that were mentioned \
explicitly in the conversation."
    )
}

/// Prompt asking for a structured analysis of a conversation transcript.
pub fn analysis_prompt(text: &str) -> String {
    format!(
        "Analyze the following doctor-patient conversation:
{text}
Respond concisely and do not repeat sections.
Provide structured medical advice in the following format:

Key Symptoms Identified:
- List the most relevant symptoms or medical conditions mentioned in the conversation.

Possible Medical Diagnosis:
- Provide a possible diagnosis based on the symptoms described. If uncertain, state \"Diagnosis pending further details.\"

Follow-up Questions for Further Diagnosis:
- List any follow-up questions to further clarify the diagnosis.

Recommended Next Steps:
- Provide next steps or tests that could be done to help confirm the diagnosis."
    )
}
