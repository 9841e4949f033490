//! Raw rule option names.
//!
//! Every option can be spelled long (`message`) or short (`m`). When a raw
//! rule carries both, the long spelling wins.

/// An option of a raw rule object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleOption {
    /// Name of the predicate to run.
    Validation,
    /// Value the predicate result is compared against.
    Expect,
    /// Error message template.
    Message,
    /// File the error under the generic key.
    CauseGenericError,
    /// Record key the input value is read from.
    Key,
    /// Slow-predicate hint.
    Wait,
    /// Pass the whole record to the predicate.
    Data,
    /// Stop this field on failure.
    Last,
    /// Stop the whole run on failure.
    LastAll,
    /// Links attached to the error.
    Redirection,
}

impl RuleOption {
    pub const ALL: [RuleOption; 10] = [
        RuleOption::Validation,
        RuleOption::Expect,
        RuleOption::Message,
        RuleOption::CauseGenericError,
        RuleOption::Key,
        RuleOption::Wait,
        RuleOption::Data,
        RuleOption::Last,
        RuleOption::LastAll,
        RuleOption::Redirection,
    ];

    pub fn long(self) -> &'static str {
        match self {
            RuleOption::Validation => "validation",
            RuleOption::Expect => "expect",
            RuleOption::Message => "message",
            RuleOption::CauseGenericError => "causeGenericError",
            RuleOption::Key => "key",
            RuleOption::Wait => "wait",
            RuleOption::Data => "data",
            RuleOption::Last => "last",
            RuleOption::LastAll => "lastAll",
            RuleOption::Redirection => "redirection",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            RuleOption::Validation => "v",
            RuleOption::Expect => "ex",
            RuleOption::Message => "m",
            RuleOption::CauseGenericError => "_e",
            RuleOption::Key => "k",
            RuleOption::Wait => "w",
            RuleOption::Data => "d",
            RuleOption::Last => "l",
            RuleOption::LastAll => "la",
            RuleOption::Redirection => "r",
        }
    }

    /// Both spellings, long first.
    pub fn spellings(self) -> [&'static str; 2] {
        [self.long(), self.short()]
    }
}

/// An option of a redirection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectionOption {
    Href,
    Title,
}

impl RedirectionOption {
    pub fn long(self) -> &'static str {
        match self {
            RedirectionOption::Href => "href",
            RedirectionOption::Title => "title",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            RedirectionOption::Href => "h",
            RedirectionOption::Title => "t",
        }
    }

    pub fn spellings(self) -> [&'static str; 2] {
        [self.long(), self.short()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn spellings_are_unique() {
        let mut seen = HashSet::new();
        for option in RuleOption::ALL {
            for name in option.spellings() {
                assert!(seen.insert(name), "duplicate option name: {name}");
            }
        }
    }

    #[rstest]
    #[case(RuleOption::Validation, ["validation", "v"])]
    #[case(RuleOption::Expect, ["expect", "ex"])]
    #[case(RuleOption::CauseGenericError, ["causeGenericError", "_e"])]
    #[case(RuleOption::Data, ["data", "d"])]
    #[case(RuleOption::LastAll, ["lastAll", "la"])]
    #[case(RuleOption::Redirection, ["redirection", "r"])]
    fn long_spelling_comes_first(#[case] option: RuleOption, #[case] expected: [&str; 2]) {
        assert_eq!(option.spellings(), expected);
    }

    #[rstest]
    #[case(RedirectionOption::Href, ["href", "h"])]
    #[case(RedirectionOption::Title, ["title", "t"])]
    fn redirection_spellings(#[case] option: RedirectionOption, #[case] expected: [&str; 2]) {
        assert_eq!(option.spellings(), expected);
    }
}
