use std::marker::PhantomData;

use rayon::prelude::*;

use crate::db::RuleDescriptor;
use crate::error::{Error, Result};
use crate::extract::Facet;
use crate::rule::Rule;

// ---------------------------------------------------------------------------
// CompiledRegex — regex fast path, fancy_regex for PCRE-only constructs
// ---------------------------------------------------------------------------

pub(crate) enum CompiledRegex {
    Standard(regex::Regex),
    Fancy(fancy_regex::Regex),
}

impl CompiledRegex {
    /// Compile `pattern` with the `regex` crate when it can handle it, falling
    /// back to fancy_regex for lookaround and backreferences.
    pub fn new(pattern: &str, case_insensitive: bool) -> std::result::Result<Self, fancy_regex::Error> {
        let full = if case_insensitive {
            format!("(?i){}", pattern)
        } else {
            pattern.to_owned()
        };
        match regex::Regex::new(&full) {
            Ok(re) => Ok(Self::Standard(re)),
            Err(_) => Ok(Self::Fancy(fancy_regex::Regex::new(&full)?)),
        }
    }

    /// First match anywhere in `haystack`. A fancy_regex runtime error
    /// (backtrack limit) counts as no match.
    pub fn captures<'a>(&self, haystack: &'a str) -> Option<Captures<'a>> {
        match self {
            Self::Standard(re) => re.captures(haystack).map(Captures::Standard),
            Self::Fancy(re) => re.captures(haystack).ok().flatten().map(Captures::Fancy),
        }
    }

    /// Number of groups, including the implicit whole-match group 0.
    pub fn captures_len(&self) -> usize {
        match self {
            Self::Standard(re) => re.captures_len(),
            Self::Fancy(re) => re.captures_len(),
        }
    }

    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }
}

// ---------------------------------------------------------------------------
// Captures — unified enum over regex::Captures and fancy_regex::Captures
// ---------------------------------------------------------------------------

/// Lightweight wrapper so extraction code doesn't need to know which regex
/// engine produced the match.
pub(crate) enum Captures<'a> {
    Standard(regex::Captures<'a>),
    Fancy(fancy_regex::Captures<'a>),
}

impl<'a> Captures<'a> {
    /// Get the matched text for capture group `i`, or `None` if the group
    /// doesn't exist or didn't participate in the match.
    pub fn get_str(&self, i: usize) -> Option<&'a str> {
        match self {
            Captures::Standard(c) => c.get(i).map(|m| m.as_str()),
            Captures::Fancy(c) => c.get(i).map(|m| m.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine — ordered first-match-wins evaluation for one facet
// ---------------------------------------------------------------------------

/// Ordered list of compiled rules producing facet `F`.
///
/// Immutable after [`Engine::build`]; evaluation walks the rules in the order
/// they were supplied and stops at the first one that yields a facet.
pub(crate) struct Engine<F> {
    rules: Vec<Rule>,
    /// Literal rules match against the lowercased input; skip lowering when
    /// there are none.
    has_literal_rules: bool,
    _facet: PhantomData<fn() -> F>,
    #[cfg(test)]
    pub(crate) evaluations: std::sync::atomic::AtomicUsize,
}

impl<F: Facet> Engine<F> {
    /// Compile every descriptor of `section`, preserving order. Any invalid
    /// descriptor fails the whole build.
    pub fn build(section: &'static str, descriptors: &[RuleDescriptor]) -> Result<Self> {
        let rules: Vec<Rule> = descriptors
            .par_iter()
            .enumerate()
            .map(|(index, descriptor)| Rule::compile(section, index, descriptor))
            .collect::<Result<Vec<_>>>()?;

        let fancy = rules
            .iter()
            .filter(|r| matches!(r, Rule::Pattern(p) if p.regex.is_fancy()))
            .count();
        tracing::debug!(section, rules = rules.len(), fancy, "compiled rule section");

        let has_literal_rules = rules.iter().any(|r| matches!(r, Rule::Literal(_)));
        Ok(Self {
            rules,
            has_literal_rules,
            _facet: PhantomData,
            #[cfg(test)]
            evaluations: std::sync::atomic::AtomicUsize::new(0),
        })
    }

    /// First facet produced by any rule, in list order.
    pub fn match_first(&self, input: &str) -> Option<F> {
        #[cfg(test)]
        self.evaluations
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        let lowered = self.has_literal_rules.then(|| input.to_lowercase());
        self.rules.iter().find_map(|rule| match rule {
            Rule::Pattern(p) => p.regex.captures(input).and_then(|caps| F::from_pattern(p, &caps)),
            Rule::Literal(l) => lowered
                .as_deref()
                .and_then(|lowered| l.evaluate(lowered))
                .map(F::from_literal),
        })
    }

    /// Classify `input`, falling back to the facet's "Other" value.
    pub fn classify(&self, input: &str) -> F {
        if input.is_empty() {
            if let Some(facet) = F::for_empty_input() {
                return facet;
            }
        }
        self.match_first(input).unwrap_or_else(F::other)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

pub(crate) fn require_section<'a>(
    section: &'static str,
    rules: &'a Option<Vec<RuleDescriptor>>,
) -> Result<&'a [RuleDescriptor]> {
    rules.as_deref().ok_or(Error::MissingSection(section))
}
