//! Intent classification of free-text study interests.
//!
//! Two ordered rule tables map the user's text onto an optional degree
//! level and an optional target country. Within a table the first rule
//! with a matching term wins; later rules are not consulted.

/// How a term is located in the lowercased input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    /// Anywhere in the text.
    Substring(&'static str),
    /// Only as a whole alphanumeric token. Used for two-letter
    /// abbreviations that otherwise hide inside ordinary words.
    Word(&'static str),
}

impl Term {
    fn matches(self, lowered: &str) -> bool {
        match self {
            Self::Substring(needle) => lowered.contains(needle),
            Self::Word(needle) => lowered.match_indices(needle).any(|(at, _)| {
                let before = lowered[..at].chars().next_back();
                let after = lowered[at + needle.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric)
                    && !after.is_some_and(char::is_alphanumeric)
            }),
        }
    }
}

/// Requested degree level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegreeLevel {
    /// Bachelor-level programs.
    Undergraduate,
    /// Master-level programs.
    Graduate,
    /// PhD programs.
    Doctoral,
}

impl DegreeLevel {
    /// The provider clause that matches any common spelling of this level.
    pub fn clause(self) -> &'static str {
        match self {
            Self::Undergraduate => r#"("BS" OR "BSc" OR "Bachelor" OR "Undergraduate")"#,
            Self::Graduate => r#"("MS" OR "MSc" OR "Master" OR "Graduate")"#,
            Self::Doctoral => r#"("PhD" OR "Doctorate" OR "Doctoral")"#,
        }
    }
}

/// Target study country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    UnitedStates,
    UnitedKingdom,
    Canada,
    Australia,
}

impl Country {
    /// Human-readable country alternation.
    pub fn clause(self) -> &'static str {
        match self {
            Self::UnitedStates => r#""United States" OR "USA""#,
            Self::UnitedKingdom => r#""United Kingdom" OR "UK""#,
            Self::Canada => r#""Canada""#,
            Self::Australia => r#""Australia""#,
        }
    }

    /// Restriction to the country's academic domains.
    pub fn site_scope(self) -> &'static str {
        match self {
            Self::UnitedStates => "(site:.edu OR site:.us)",
            Self::UnitedKingdom => "site:.ac.uk",
            Self::Canada => "site:.ca",
            Self::Australia => "site:.edu.au",
        }
    }
}

struct Rule<T> {
    terms: &'static [Term],
    value: T,
}

const DEGREE_RULES: &[Rule<DegreeLevel>] = &[
    Rule {
        terms: &[
            Term::Word("bs"),
            Term::Substring("bsc"),
            Term::Substring("bachelor"),
            Term::Substring("undergraduate"),
        ],
        value: DegreeLevel::Undergraduate,
    },
    Rule {
        terms: &[
            Term::Word("ms"),
            Term::Substring("msc"),
            Term::Substring("master"),
            Term::Substring("graduate"),
        ],
        value: DegreeLevel::Graduate,
    },
    Rule {
        terms: &[
            Term::Substring("phd"),
            Term::Substring("doctorate"),
            Term::Substring("doctoral"),
        ],
        value: DegreeLevel::Doctoral,
    },
];

const COUNTRY_RULES: &[Rule<Country>] = &[
    Rule {
        terms: &[Term::Substring("usa"), Term::Substring("united states")],
        value: Country::UnitedStates,
    },
    Rule {
        terms: &[Term::Word("uk"), Term::Substring("united kingdom")],
        value: Country::UnitedKingdom,
    },
    Rule {
        terms: &[Term::Substring("canada")],
        value: Country::Canada,
    },
    Rule {
        terms: &[Term::Substring("australia")],
        value: Country::Australia,
    },
];

fn first_match<T: Copy>(rules: &[Rule<T>], lowered: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.terms.iter().any(|term| term.matches(lowered)))
        .map(|rule| rule.value)
}

/// Hints derived from the user's text. Either part may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub degree: Option<DegreeLevel>,
    pub country: Option<Country>,
}

impl Classification {
    /// Degree clause, or `""` when no level was recognised.
    pub fn degree_clause(&self) -> &'static str {
        self.degree.map_or("", DegreeLevel::clause)
    }

    /// Country alternation, or `""`.
    pub fn country_clause(&self) -> &'static str {
        self.country.map_or("", Country::clause)
    }

    /// Site-scoping expression, or `""`.
    pub fn site_clause(&self) -> &'static str {
        self.country.map_or("", Country::site_scope)
    }
}

/// Classify raw user text. Never fails; no match is a normal outcome.
pub fn classify(text: &str) -> Classification {
    let lowered = text.to_lowercase();
    Classification {
        degree: first_match(DEGREE_RULES, &lowered),
        country: first_match(COUNTRY_RULES, &lowered),
    }
}
