use regex::Regex;
use std::fmt;

/// Redacts credentials from text before it is logged
#[derive(Clone)]
pub struct SecretScrubber {
    basic_pattern: Regex,
    bearer_pattern: Regex,
    key_field_pattern: Regex,
    password_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            // Basic tokens in Authorization headers
            basic_pattern: Regex::new(r"Basic\s+[A-Za-z0-9+/=._:-]+").expect("valid regex"),
            // Bearer tokens in Authorization headers
            bearer_pattern: Regex::new(r"Bearer\s+[A-Za-z0-9._~+/=-]+").expect("valid regex"),
            // key, api_key, token, secret fields in JSON or key=value form
            key_field_pattern: Regex::new(
                r#"(?i)(["']?(?:key|api_key|apikey|token|secret)["']?\s*[:=]\s*)["']?[^"'\s,}]+["']?"#,
            )
            .expect("valid regex"),
            // password fields
            password_pattern: Regex::new(r#"(?i)(["']?password["']?\s*[:=]\s*)["']?[^"'\s,}]+["']?"#)
                .expect("valid regex"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .basic_pattern
            .replace_all(message, "Basic [TOKEN_REDACTED]");
        let scrubbed = self
            .bearer_pattern
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]");
        let scrubbed = self.key_field_pattern.replace_all(&scrubbed, "${1}[REDACTED]");
        self.password_pattern
            .replace_all(&scrubbed, "${1}[REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
