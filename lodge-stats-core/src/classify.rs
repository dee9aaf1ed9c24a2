//! Best-effort adventure-type detection from scenario titles.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of organized-play adventure a session ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdventureType {
    Bounty,
    Quest,
    Scenario,
    Adventure,
    OneShot,
    AdventurePathBook,
    Unknown,
}

impl AdventureType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bounty => "Bounty",
            Self::Quest => "Quest",
            Self::Scenario => "Scenario",
            Self::Adventure => "Adventure",
            Self::OneShot => "OneShot",
            Self::AdventurePathBook => "AdventurePathBook",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AdventureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Checked in order; the first match wins.
static RULES: Lazy<Vec<(AdventureType, Regex)>> = Lazy::new(|| {
    [
        (AdventureType::Bounty, r"^(PF2|SF) Bounty "),
        (AdventureType::Quest, r"^(PFS2|SFS) Quest "),
        (AdventureType::Scenario, r"^(PFS1|PFS2|SFS) (#*[0-9]|Intro)"),
        (AdventureType::OneShot, r"^(PF2|SF) One-Shot "),
        (AdventureType::Adventure, r"^(PF|PF2|SF) (Mod|Adventure)"),
        (AdventureType::AdventurePathBook, r"^(PF1|PF2|SF) AP "),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        (
            kind,
            Regex::new(pattern).expect("adventure pattern is a valid regex"),
        )
    })
    .collect()
});

/// Guess the adventure type of a scenario title.
#[must_use]
pub fn classify(title: &str) -> AdventureType {
    RULES
        .iter()
        .find(|(_, pattern)| pattern.is_match(title))
        .map_or(AdventureType::Unknown, |(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_title_shapes() {
        let cases = [
            ("PF2 Bounty Foo", AdventureType::Bounty),
            ("SF Bounty 3: Lost Cargo", AdventureType::Bounty),
            ("PFS2 Quest 1", AdventureType::Quest),
            ("SFS Quest 4: The Ring", AdventureType::Quest),
            ("PFS2 #3-01 Foo", AdventureType::Scenario),
            ("PFS1 ##9-12 Old Favorite", AdventureType::Scenario),
            ("SFS 1-01 The Commencement", AdventureType::Scenario),
            ("PFS2 Intro: Year of the Open Road", AdventureType::Scenario),
            ("PF2 One-Shot Foo", AdventureType::OneShot),
            ("SF One-Shot #2", AdventureType::OneShot),
            ("PF Mod Foo", AdventureType::Adventure),
            ("PF2 Adventure: Malevolence", AdventureType::Adventure),
            ("SF Module Whatever", AdventureType::Adventure),
            ("PF1 AP 1: Foo", AdventureType::AdventurePathBook),
            ("PF2 AP 145: Hellknight Hill", AdventureType::AdventurePathBook),
            ("Random Title", AdventureType::Unknown),
            ("", AdventureType::Unknown),
        ];
        for (title, expected) in cases {
            assert_eq!(classify(title), expected, "title {title:?}");
        }
    }

    #[test]
    fn prefixes_must_be_exact() {
        assert_eq!(classify("pfs2 #1-01"), AdventureType::Unknown);
        assert_eq!(classify(" PFS2 #1-01"), AdventureType::Unknown);
        assert_eq!(classify("PF2 Bounty"), AdventureType::Unknown);
        assert_eq!(classify("PFS2 Special"), AdventureType::Unknown);
        assert_eq!(classify("PF3 AP 1"), AdventureType::Unknown);
    }

    #[test]
    fn display_uses_variant_names() {
        assert_eq!(AdventureType::OneShot.to_string(), "OneShot");
        assert_eq!(
            AdventureType::AdventurePathBook.to_string(),
            "AdventurePathBook"
        );
    }
}
