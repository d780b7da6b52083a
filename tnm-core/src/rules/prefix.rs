//! Modifier prefix grammar

use crate::component::Modifier;

/// Which modifier alphabets may precede a component code
///
/// History modifiers (`y`, `r`, `a`) come first, each at most once and in that
/// order; at most one assessment modifier (`u`, `p`, `c`) follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixGrammar {
    pub history: bool,
    pub assessment: bool,
}

impl PrefixGrammar {
    /// No prefix allowed
    pub const NONE: PrefixGrammar = PrefixGrammar {
        history: false,
        assessment: false,
    };

    /// A single assessment modifier
    pub const ASSESSMENT: PrefixGrammar = PrefixGrammar {
        history: false,
        assessment: true,
    };

    /// History modifiers followed by an assessment modifier
    pub const FULL: PrefixGrammar = PrefixGrammar {
        history: true,
        assessment: true,
    };

    /// Regex fragment recognizing the prefix
    pub fn pattern(&self) -> String {
        let mut pattern = String::new();
        if self.history {
            for m in Modifier::HISTORY {
                pattern.push(m.as_char());
                pattern.push('?');
            }
        }
        if self.assessment {
            pattern.push('[');
            pattern.extend(Modifier::ASSESSMENT.iter().map(|m| m.as_char()));
            pattern.push_str("]?");
        }
        pattern
    }

    /// Split leading modifiers off `text`
    ///
    /// Returns the modifiers in source order and the remaining text.
    pub fn split<'a>(&self, text: &'a str) -> (Vec<Modifier>, &'a str) {
        let mut prefixes = Vec::new();
        let mut rest = text;

        if self.history {
            for m in Modifier::HISTORY {
                if let Some(stripped) = rest.strip_prefix(m.as_char()) {
                    prefixes.push(m);
                    rest = stripped;
                }
            }
        }

        if self.assessment {
            let assessment = rest
                .chars()
                .next()
                .and_then(Modifier::from_char)
                .filter(|m| !m.is_history());
            if let Some(m) = assessment {
                prefixes.push(m);
                rest = &rest[m.as_char().len_utf8()..];
            }
        }

        (prefixes, rest)
    }
}
