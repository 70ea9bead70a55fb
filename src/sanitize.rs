use regex::Regex;
use std::sync::OnceLock;

/// Turns free text into a key that is safe as a TOML table name and as a
/// file name. Collisions are not detected; callers overwrite.
pub trait Sanitizer {
    fn sanitize(&self, raw: &str) -> String;
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> String,
{
    fn sanitize(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Default slug transform: lowercase ASCII letters, digits, `-` and `_`.
///
/// Whitespace and path separators become `_`, everything else outside the
/// allowed set is dropped, and leading/trailing `_`, `-` and `.` are
/// trimmed. `"My Terminal/2"` becomes `"my_terminal_2"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureSlug;

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s/\\]+").unwrap())
}

fn disallowed_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_-]").unwrap())
}

impl Sanitizer for SecureSlug {
    fn sanitize(&self, raw: &str) -> String {
        let lowered = raw.trim().to_lowercase();
        let joined = separator_regex().replace_all(&lowered, "_");
        let kept = disallowed_regex().replace_all(&joined, "");
        kept.trim_matches(|c: char| c == '_' || c == '-' || c == '.')
            .to_string()
    }
}
