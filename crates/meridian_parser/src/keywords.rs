use std::fmt;

use unicase::UniCase;

/// SQL keywords recognized by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Keyword {
    AS,
    BIGINT,
    BOOLEAN,
    CAST,
    DOUBLE,
    FALSE,
    FROM,
    NULL,
    SELECT,
    TRUE,
    VALUES,
    VARCHAR,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

pub const ALL_KEYWORDS: &[(&str, Keyword)] = &[
    ("AS", Keyword::AS),
    ("BIGINT", Keyword::BIGINT),
    ("BOOLEAN", Keyword::BOOLEAN),
    ("CAST", Keyword::CAST),
    ("DOUBLE", Keyword::DOUBLE),
    ("FALSE", Keyword::FALSE),
    ("FROM", Keyword::FROM),
    ("NULL", Keyword::NULL),
    ("SELECT", Keyword::SELECT),
    ("TRUE", Keyword::TRUE),
    ("VALUES", Keyword::VALUES),
    ("VARCHAR", Keyword::VARCHAR),
];

/// Look up a keyword from a string, ignoring case.
pub fn keyword_from_str(s: &str) -> Option<Keyword> {
    let s = UniCase::ascii(s);
    ALL_KEYWORDS
        .iter()
        .find(|(kw, _)| UniCase::ascii(*kw) == s)
        .map(|(_, kw)| *kw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Some(Keyword::SELECT), keyword_from_str("select"));
        assert_eq!(Some(Keyword::SELECT), keyword_from_str("SeLeCt"));
        assert_eq!(None, keyword_from_str("st_point"));
    }
}
