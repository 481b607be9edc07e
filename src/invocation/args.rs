//! Flag probing over raw argument tokens
//!
//! Deliberately not a general argument parser: a probe only answers
//! "was this flag given, and with what".

/// Prefix that marks a token as a flag rather than a value
pub const FLAG_PREFIX: &str = "--";

/// Value recovered for a flag that was present
///
/// An absent flag is `None` at the call site, never `Bool(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Flag given as a switch (`true`) or with an explicit boolean-like value
    Bool(bool),

    /// Flag given with any other value, verbatim
    Text(String),
}

impl FlagValue {
    /// Returns the string value, if the flag carried one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FlagValue::Text(s) => Some(s),
            FlagValue::Bool(_) => None,
        }
    }

    /// Returns true for `Bool(true)` only
    pub fn is_true(&self) -> bool {
        matches!(self, FlagValue::Bool(true))
    }
}

/// Normalizes a flag name to its `--name` token form
pub fn flag_token(flag: &str) -> String {
    if flag.starts_with(FLAG_PREFIX) {
        flag.to_string()
    } else {
        format!("{}{}", FLAG_PREFIX, flag)
    }
}

/// Scans `tokens` for `flag` and classifies the token that follows it
pub fn scan<S: AsRef<str>>(tokens: &[S], flag: &str) -> Option<FlagValue> {
    let flag = flag_token(flag);
    let pos = tokens.iter().position(|t| t.as_ref() == flag)?;

    let next = match tokens.get(pos + 1) {
        Some(next) => next.as_ref(),
        None => return Some(FlagValue::Bool(true)),
    };

    if next.starts_with(FLAG_PREFIX) {
        return Some(FlagValue::Bool(true));
    }

    let value = match next.to_ascii_lowercase().as_str() {
        "true" | "1" => FlagValue::Bool(true),
        "false" | "0" => FlagValue::Bool(false),
        _ => FlagValue::Text(next.to_string()),
    };

    Some(value)
}

/// Process arguments, without the program name
#[derive(Debug, Clone, Default)]
pub struct Args {
    tokens: Vec<String>,
}

impl Args {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Captures the arguments of the running process
    pub fn from_env() -> Self {
        Self::new(std::env::args().skip(1))
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn probe(&self, flag: &str) -> Option<FlagValue> {
        scan(&self.tokens, flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flag_is_none() {
        let args = Args::new(["--source", "x.json"]);
        assert_eq!(args.probe("--output"), None);
    }

    #[test]
    fn trailing_flag_is_switch() {
        let args = Args::new(["--source", "x.json", "--output"]);
        assert_eq!(args.probe("--output"), Some(FlagValue::Bool(true)));
    }

    #[test]
    fn flag_followed_by_flag_is_switch() {
        let args = Args::new(["--output", "--source", "x.json"]);
        assert_eq!(args.probe("--output"), Some(FlagValue::Bool(true)));
    }

    #[test]
    fn boolean_like_values() {
        assert_eq!(
            Args::new(["--output", "false"]).probe("--output"),
            Some(FlagValue::Bool(false))
        );
        assert_eq!(
            Args::new(["--output", "0"]).probe("--output"),
            Some(FlagValue::Bool(false))
        );
        assert_eq!(
            Args::new(["--output", "TRUE"]).probe("--output"),
            Some(FlagValue::Bool(true))
        );
        assert_eq!(
            Args::new(["--output", "1"]).probe("--output"),
            Some(FlagValue::Bool(true))
        );
    }

    #[test]
    fn string_value_is_verbatim() {
        let args = Args::new(["--output", "./docs"]);
        assert_eq!(args.probe("--output"), Some(FlagValue::Text("./docs".to_string())));
    }

    #[test]
    fn bare_name_is_prefixed() {
        let args = Args::new(["--output", "./docs"]);
        assert_eq!(args.probe("output"), args.probe("--output"));
    }

    #[test]
    fn exact_match_only() {
        let args = Args::new(["--outputs", "./docs"]);
        assert_eq!(args.probe("--output"), None);
    }

    #[test]
    fn flag_value_accessors() {
        assert_eq!(FlagValue::Text("a".into()).as_text(), Some("a"));
        assert_eq!(FlagValue::Bool(true).as_text(), None);
        assert!(FlagValue::Bool(true).is_true());
        assert!(!FlagValue::Bool(false).is_true());
        assert!(!FlagValue::Text("true".into()).is_true());
    }
}
