//! Persona prompt templates.

use crate::models::Persona;

/// Focus label used when the client does not send one.
pub const DEFAULT_FOCUS: &str = "General";

/// Static parts of a persona's system instruction.
struct Template {
    role: &'static str,
    tone: &'static str,
    focus_hint: &'static str,
    goal: &'static str,
}

static SENIOR: Template = Template {
    role: "You are a Principal Software Engineer.",
    tone: "Strict, critical, concise.",
    focus_hint: "Security, Scalability, Performance",
    goal: "Identify blocking issues. Report each with its severity, impact, and trigger, \
           and state the main tradeoff.",
};

static JUNIOR: Template = Template {
    role: "You are a Friendly Senior Mentor.",
    tone: "Encouraging, educational, use emojis.",
    focus_hint: "Readability, Best Practices",
    goal: "Teach the junior developer. Give practical tips, each with a fix and a corrected \
           code snippet.",
};

fn template(persona: Persona) -> &'static Template {
    match persona {
        Persona::Senior => &SENIOR,
        Persona::Junior => &JUNIOR,
    }
}

/// Build the system instruction for a persona.
///
/// Blank `focus_area` falls back to [`DEFAULT_FOCUS`]; blank
/// `description` renders as `None`.
pub fn system_instruction(
    persona: Persona,
    focus_area: Option<&str>,
    description: Option<&str>,
) -> String {
    let t = template(persona);
    let focus = non_blank(focus_area).unwrap_or(DEFAULT_FOCUS);
    let context = non_blank(description).unwrap_or("None");
    format!(
        "{role}\n\
         Tone: {tone}\n\
         Focus: {focus} ({hint}).\n\
         Goal: {goal}\n\
         Context: {context}.\n\
         Respond only with JSON matching the requested schema.",
        role = t.role,
        tone = t.tone,
        hint = t.focus_hint,
        goal = t.goal,
    )
}

/// Build the user content wrapping the code under review.
pub fn user_content(code: &str, language: Option<&str>) -> String {
    match non_blank(language) {
        Some(lang) => format!("Review the following {lang} code:\n\n{code}"),
        None => format!("Review the following code:\n\n{code}"),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
