use aho_corasick::AhoCorasick;

use crate::db::RuleDescriptor;
use crate::error::{Error, Result};
use crate::parser::CompiledRegex;

/// Reserved family marking an automated client.
pub(crate) const SPIDER: &str = "spider";

const DEFAULT_VERSION_SEPARATOR: &str = "/";

/// Characters that end a version slice in a literal match.
const VERSION_DELIMITERS: &[char] = &[' ', ';', '/', ',', ')'];

/// One compiled matching directive.
pub(crate) enum Rule {
    Pattern(PatternRule),
    Literal(LiteralRule),
}

pub(crate) struct PatternRule {
    pub regex: CompiledRegex,
    pub family_replacement: Option<String>,
    pub v1_replacement: Option<String>,
    pub v2_replacement: Option<String>,
    pub v3_replacement: Option<String>,
    pub v4_replacement: Option<String>,
    pub brand_replacement: Option<String>,
    pub model_replacement: Option<String>,
}

pub(crate) struct LiteralRule {
    /// Lowercased names, in rule order.
    names: Vec<String>,
    finder: AhoCorasick,
    require: Vec<String>,
    exclude: Vec<String>,
    family_replacement: Option<String>,
    version_separator: String,
}

/// Result of a successful literal match, borrowing from the rule and the
/// lowercased input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct LiteralMatch<'a> {
    pub family: &'a str,
    pub major: Option<&'a str>,
    pub minor: Option<&'a str>,
    pub patch: Option<&'a str>,
}

impl Rule {
    /// Compile descriptor `index` of `section`. A regex takes precedence over a
    /// name list; a descriptor with neither is a configuration error.
    pub fn compile(section: &'static str, index: usize, d: &RuleDescriptor) -> Result<Rule> {
        if let Some(pattern) = d.regex.as_deref().filter(|p| !p.is_empty()) {
            let case_insensitive = d.regex_flag.as_deref() == Some("i");
            let regex = CompiledRegex::new(pattern, case_insensitive)
                .map_err(|source| Error::Pattern { section, index, source })?;

            if d.family_replacement.is_none() && regex.captures_len() < 2 {
                tracing::warn!(
                    section,
                    index,
                    pattern,
                    "rule has no family replacement and no capture group; it can never match"
                );
            }

            return Ok(Rule::Pattern(PatternRule {
                regex,
                family_replacement: d.family_replacement.clone(),
                v1_replacement: d.v1_replacement.clone(),
                v2_replacement: d.v2_replacement.clone(),
                v3_replacement: d.v3_replacement.clone(),
                v4_replacement: d.v4_replacement.clone(),
                brand_replacement: d.brand_replacement.clone(),
                model_replacement: d.model_replacement.clone(),
            }));
        }

        let names: Vec<String> = d
            .name
            .as_deref()
            .map(|n| split_lowercase(n, '|'))
            .unwrap_or_default()
            .into_iter()
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err(Error::InvalidRule {
                section,
                index,
                descriptor: format!("{:?}", d),
            });
        }

        let finder = AhoCorasick::new(&names)?;
        Ok(Rule::Literal(LiteralRule {
            names,
            finder,
            require: d.require.as_deref().map(|r| split_lowercase(r, ',')).unwrap_or_default(),
            exclude: d.exclude.as_deref().map(|e| split_lowercase(e, ',')).unwrap_or_default(),
            family_replacement: d.family_replacement.clone(),
            version_separator: d
                .version_sep
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION_SEPARATOR.to_owned()),
        }))
    }
}

impl LiteralRule {
    /// Match against an already-lowercased input.
    ///
    /// The first configured name (in rule order, not text order) that occurs
    /// in the input is the matched name. Require/exclude failures void the
    /// whole rule.
    pub fn evaluate<'a>(&'a self, lowered: &'a str) -> Option<LiteralMatch<'a>> {
        let name = self.first_contained_name(lowered)?;

        if !self.require.iter().all(|r| lowered.contains(r.as_str())) {
            return None;
        }
        if self.exclude.iter().any(|e| lowered.contains(e.as_str())) {
            return None;
        }

        let family = self.family_replacement.as_deref().unwrap_or(name);
        let family_only = LiteralMatch {
            family,
            major: None,
            minor: None,
            patch: None,
        };

        // A bot's "version" is the alias it was recognised by.
        if family.eq_ignore_ascii_case(SPIDER) {
            return Some(LiteralMatch {
                major: Some(name),
                ..family_only
            });
        }

        if self.version_separator.is_empty() {
            return Some(family_only);
        }

        match slice_version(lowered, name, &self.version_separator) {
            Some([major, minor, patch]) => Some(LiteralMatch {
                family,
                major,
                minor,
                patch,
            }),
            None => Some(family_only),
        }
    }

    fn first_contained_name(&self, lowered: &str) -> Option<&str> {
        self.finder
            .find_overlapping_iter(lowered)
            .map(|m| m.pattern().as_usize())
            .min()
            .map(|i| self.names[i].as_str())
    }
}

/// Locate `name + sep` and split what follows (up to a delimiter) into at most
/// three dot-separated components. The third keeps any remaining dots; empty
/// components are kept as empty strings.
fn slice_version<'a>(lowered: &'a str, name: &str, sep: &str) -> Option<[Option<&'a str>; 3]> {
    let needle = format!("{}{}", name, sep);
    let start = lowered.find(&needle)? + needle.len();
    let rest = &lowered[start..];
    let end = rest.find(VERSION_DELIMITERS).unwrap_or(rest.len());

    let mut parts = rest[..end].splitn(3, '.').map(str::trim);
    Some([parts.next(), parts.next(), parts.next()])
}

fn split_lowercase(list: &str, delimiter: char) -> Vec<String> {
    list.to_lowercase()
        .split(delimiter)
        .map(|s| s.trim().to_owned())
        .collect()
}
