//! Formatted build output for the log pane
//!
//! Errors take priority over warnings. When any error looks like a syntax
//! error, cascading non-syntax errors are hidden; the syntax error is the
//! root cause and the rest is noise. Stack-trace lines are stripped from
//! displayed messages for readability.

use packboard_core::StatsPayload;

const SYNTAX_ERROR_LABEL: &str = "Syntax error:";

/// Does this message look like a compiler syntax error?
pub fn is_likely_syntax_error(message: &str) -> bool {
    message.contains(SYNTAX_ERROR_LABEL)
}

/// Lines like `at /src/app.js:10:3` or `at render (app.js:4:12)`
fn is_stack_line(line: &str) -> bool {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix("at ") else {
        return false;
    };
    let rest = rest.trim_end_matches(|c: char| c == ')' || c.is_whitespace());
    let mut parts = rest.rsplitn(3, ':');
    let (Some(col), Some(row), Some(_path)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(col) && all_digits(row)
}

fn clean_message(message: &str) -> String {
    let message = message.replace("Module build failed: SyntaxError:", SYNTAX_ERROR_LABEL);
    message
        .lines()
        .filter(|line| !is_stack_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turn a `stats` payload into the human-readable log entry
pub fn format_build_output(stats: &StatsPayload) -> String {
    let mut output: Vec<String> = Vec::new();

    if stats.errors {
        output.push("Failed to compile.".to_string());
        output.push(String::new());

        let mut errors: Vec<String> = stats
            .data
            .errors
            .iter()
            .map(|message| format!("Error in {}", clean_message(message)))
            .collect();
        if errors.iter().any(|m| is_likely_syntax_error(m)) {
            errors.retain(|m| is_likely_syntax_error(m));
        }
        for message in errors {
            output.push(message);
            output.push(String::new());
        }
        return output.join("\n");
    }

    if stats.warnings {
        output.push("Compiled with warnings.".to_string());
        output.push(String::new());
        for message in &stats.data.warnings {
            output.push(format!("Warning in {}", clean_message(message)));
            output.push(String::new());
        }
        return output.join("\n");
    }

    output.push("Compiled successfully!".to_string());
    output.push(String::new());
    output.join("\n")
}
