#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
    #[error("rule source is missing the `{0}` section")]
    MissingSection(&'static str),
    /// A descriptor with neither a usable `regex` nor a `name` list.
    #[error("{section}[{index}] has neither a regex nor a name list: {descriptor}")]
    InvalidRule {
        section: &'static str,
        index: usize,
        descriptor: String,
    },
    #[error("{section}[{index}] has an invalid regex")]
    Pattern {
        section: &'static str,
        index: usize,
        #[source]
        source: fancy_regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
