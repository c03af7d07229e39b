//! Subsystem identifiers: the opaque, case-sensitive short names that tag
//! every log record with its originating module (e.g. `"WebServer"`,
//! `"mDNSServer"`).

/// Maximum length of a subsystem identifier.
pub const MAX_SUBSYSTEM_LEN: usize = 32;

/// An opaque, case-sensitive subsystem name, capped at
/// [`MAX_SUBSYSTEM_LEN`] bytes.
///
/// Longer names are truncated rather than rejected: a `log()` call never
/// fails over metadata length, it degrades gracefully.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subsystem(String);

impl Subsystem {
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if name.len() > MAX_SUBSYSTEM_LEN {
            let mut truncated = name.as_str();
            while truncated.len() > MAX_SUBSYSTEM_LEN {
                // Step back to the previous char boundary so we never split
                // a multi-byte UTF-8 sequence.
                truncated = &truncated[..truncated.len() - 1];
                while !truncated.is_char_boundary(truncated.len()) {
                    truncated = &truncated[..truncated.len() - 1];
                }
            }
            name = truncated.to_string();
        }
        Subsystem(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Subsystem {
    fn from(value: &str) -> Self {
        Subsystem::new(value)
    }
}

impl From<String> for Subsystem {
    fn from(value: String) -> Self {
        Subsystem::new(value)
    }
}

impl std::borrow::Borrow<str> for Subsystem {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_pass_through_unchanged() {
        assert_eq!(Subsystem::new("WebServer").as_str(), "WebServer");
    }

    #[test]
    fn case_is_preserved() {
        assert_ne!(Subsystem::new("mDNSServer"), Subsystem::new("mdnsserver"));
    }

    #[test]
    fn long_names_are_truncated_to_max_len() {
        let long = "x".repeat(100);
        let s = Subsystem::new(long);
        assert_eq!(s.as_str().len(), MAX_SUBSYSTEM_LEN);
    }

    #[test]
    fn truncation_respects_utf8_boundaries() {
        let long = "é".repeat(40); // 2 bytes each, 80 bytes total
        let s = Subsystem::new(long);
        assert!(s.as_str().len() <= MAX_SUBSYSTEM_LEN);
        assert!(std::str::from_utf8(s.as_str().as_bytes()).is_ok());
    }
}
