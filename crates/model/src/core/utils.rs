/// Escape CSV per PostgreSQL COPY CSV rules:
/// - field is wrapped in double quotes
/// - internal `"` becomes `""`
/// - commas, newlines, tabs are safe because quoting protects them
pub fn escape_csv_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');

    for ch in s.chars() {
        if ch == '"' {
            out.push('"'); // double the quote
        }
        out.push(ch);
    }

    out.push('"');
    out
}

/// Reverses [`escape_csv_string`]; unquoted input is returned as is.
pub fn unescape_csv_string(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].replace("\"\"", "\"")
    } else {
        trimmed.to_string()
    }
}
