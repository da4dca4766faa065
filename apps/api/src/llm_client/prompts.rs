// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it and pulls cross-cutting pieces from here.

/// Appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Provide ONLY a valid JSON response with this exact \
    structure (no markdown, no extra text, ONLY JSON):";
