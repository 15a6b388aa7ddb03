use crate::helpers::capture_owned;
use crate::parser::Captures;
use crate::rule::{LiteralMatch, PatternRule};
use crate::substitution::{resolve_family, substitute};
use crate::types::{Client, Device, Os};

/// How one engine turns a rule hit into its facet.
pub(crate) trait Facet: Sized {
    /// Canonical result when every rule declines.
    fn other() -> Self;

    /// Short-circuit for an empty input, before any rule runs.
    fn for_empty_input() -> Option<Self> {
        None
    }

    /// `None` voids the match and lets the next rule try.
    fn from_pattern(rule: &PatternRule, captures: &Captures) -> Option<Self>;

    fn from_literal(hit: LiteralMatch<'_>) -> Self;
}

impl Facet for Client {
    fn other() -> Self {
        Client::other()
    }

    fn for_empty_input() -> Option<Self> {
        Some(Client::spider())
    }

    fn from_pattern(rule: &PatternRule, captures: &Captures) -> Option<Self> {
        let family = resolve_family(rule.family_replacement.as_deref(), captures)?;
        let major = rule
            .v1_replacement
            .clone()
            .or_else(|| capture_owned(captures, 2));
        // The patch level is only read when the minor came from the regex too.
        let (minor, patch) = match &rule.v2_replacement {
            Some(v2) => (Some(v2.clone()), None),
            None => (capture_owned(captures, 3), capture_owned(captures, 4)),
        };
        Some(Client {
            family,
            major,
            minor,
            patch,
        })
    }

    fn from_literal(hit: LiteralMatch<'_>) -> Self {
        Client::new(hit.family, hit.major, hit.minor, hit.patch)
    }
}

impl Facet for Os {
    fn other() -> Self {
        Os::other()
    }

    fn from_pattern(rule: &PatternRule, captures: &Captures) -> Option<Self> {
        let family = resolve_family(rule.family_replacement.as_deref(), captures)?;
        let component = |replacement: &Option<String>, group: usize| {
            replacement.clone().or_else(|| capture_owned(captures, group))
        };
        Some(Os {
            family,
            major: component(&rule.v1_replacement, 2),
            minor: component(&rule.v2_replacement, 3),
            patch: component(&rule.v3_replacement, 4),
            patch_minor: component(&rule.v4_replacement, 5),
        })
    }

    fn from_literal(hit: LiteralMatch<'_>) -> Self {
        Os::new(hit.family, [hit.major, hit.minor, hit.patch, None])
    }
}

impl Facet for Device {
    fn other() -> Self {
        Device::other()
    }

    fn from_pattern(rule: &PatternRule, captures: &Captures) -> Option<Self> {
        let family = match &rule.family_replacement {
            Some(tpl) => substitute(tpl, captures),
            None => capture_owned(captures, 1)?,
        };
        if family.is_empty() {
            return None;
        }
        let brand = rule
            .brand_replacement
            .as_deref()
            .map(|tpl| substitute(tpl, captures))
            .filter(|b| !b.is_empty());
        let model = match &rule.model_replacement {
            Some(tpl) => Some(substitute(tpl, captures)),
            None => capture_owned(captures, 1),
        }
        .filter(|m| !m.is_empty());
        Some(Device {
            family,
            brand,
            model,
            is_mobile: false,
        })
    }

    fn from_literal(hit: LiteralMatch<'_>) -> Self {
        Device::new(hit.family, None, None)
    }
}
