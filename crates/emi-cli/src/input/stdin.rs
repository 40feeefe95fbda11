use serde_json::Value;
use std::io::{self, Read};

/// Text piped into stdin, or None when stdin is a terminal or empty.
fn piped_text() -> io::Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Piped stdin parsed as JSON.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let Some(text) = piped_text()? else {
        return Ok(None);
    };
    log::debug!("parsing {} bytes of piped input", text.len());
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| format!("stdin is not valid JSON: {}", e))?;
    Ok(Some(value))
}
