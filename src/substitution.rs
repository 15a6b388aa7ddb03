use crate::parser::Captures;

/// Resolve a client/OS family.
///
/// With a template, the first `$1` is replaced by group 1 when that group
/// participated; otherwise the template is used verbatim. Without a template
/// the family is group 1 itself, or `None` when there is no group 1.
pub(crate) fn resolve_family(template: Option<&str>, captures: &Captures) -> Option<String> {
    match template {
        Some(t) => match captures.get_str(1) {
            Some(group) if t.contains("$1") => Some(t.replacen("$1", group, 1)),
            _ => Some(t.to_owned()),
        },
        None => captures.get_str(1).map(str::to_owned),
    }
}

/// Replace every `$1`..`$9` in `template` with the matching capture group,
/// then trim surrounding whitespace. Groups that didn't participate become
/// empty.
pub(crate) fn substitute(template: &str, captures: &Captures) -> String {
    if !template.contains('$') {
        return template.trim().to_owned();
    }

    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            if let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    chars.next();
                    let idx = (d as u8 - b'0') as usize;
                    if let Some(m) = captures.get_str(idx) {
                        result.push_str(m);
                    }
                    continue;
                }
            }
        }
        result.push(c);
    }

    result.trim().to_owned()
}
