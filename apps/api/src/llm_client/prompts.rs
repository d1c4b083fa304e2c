// Shared prompt fragments. Each service that calls the completion endpoint
// keeps its own templates in a prompts.rs alongside it.

/// Keeps the model's output in a shape the section formatter can parse.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Write plain text only. Do NOT use markdown headings, tables, or code fences. \
    Put each section heading on its own line in UPPERCASE. \
    Start every list item on a new line with \"- \".";

/// Appended to every generation prompt.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Only use facts provided above. Do NOT invent employers, dates, degrees, or metrics.";
