//! Review prompt construction

use diffsense_domain::ChangeUnit;

/// Build a review prompt embedding the change unit and a domain instruction
///
/// New lines are numbered with their real file line numbers so the backend
/// can reference lines the way findings do. The reply format is pinned in
/// the prompt to keep the tolerant reply grammar on a short leash.
pub fn build_prompt(unit: &ChangeUnit, instruction: &str) -> String {
    let language = unit
        .language
        .map(|lang| lang.as_str())
        .unwrap_or("unknown");

    let mut prompt = format!(
        "You are an expert code reviewer. {instruction}\n\n\
         File: {} (language: {language})\n",
        unit.file_path
    );

    if !unit.original_lines.is_empty() {
        prompt.push_str("\nOriginal code:\n");
        for line in &unit.original_lines {
            prompt.push_str(line);
            prompt.push('\n');
        }
    }

    prompt.push_str("\nChanged code:\n");
    for (offset, line) in unit.new_lines.iter().enumerate() {
        prompt.push_str(&format!(
            "{}: {}\n",
            unit.start_line + offset as u32,
            line
        ));
    }

    prompt.push_str(
        "\nReport each issue on its own line as \
         `<severity>: line <number> <description>`, where severity is \
         critical, warning, or info. Reply with nothing if there are no \
         issues.",
    );
    prompt
}
