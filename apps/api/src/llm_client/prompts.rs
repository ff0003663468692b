// Cross-cutting prompt fragments and template rendering.
// Feature prompts live next to the code that sends them (see analysis/prompts.rs).

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a task-specific system prompt with the JSON-only instruction.
pub fn json_system(task: &str) -> String {
    format!("{} {}", task.trim_end(), JSON_ONLY_INSTRUCTION)
}

/// Replaces each `{key}` placeholder in `template` with its value.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
