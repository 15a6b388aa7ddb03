use crate::parser::Captures;

/// Rendered version when no component is available.
pub(crate) const UNKNOWN: &str = "unknown";

pub(crate) fn capture_owned(captures: &Captures, group: usize) -> Option<String> {
    captures.get_str(group).map(str::to_owned)
}

/// Dot-join components from the front, stopping at the first absent or empty
/// one. Returns `None` when not even the first component is present.
pub(crate) fn join_version(components: &[Option<&str>]) -> Option<String> {
    let mut out = String::new();
    for component in components {
        match component {
            Some(c) if !c.is_empty() => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(c);
            }
            _ => break,
        }
    }
    (!out.is_empty()).then_some(out)
}

/// Renders an optional field as a quoted string or `null`.
pub(crate) struct Quoted<'a>(pub Option<&'a str>);

impl std::fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            None => f.write_str("null"),
        }
    }
}
