/// Identifier of the active learning section, persisted across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Home,
    Compare,
    Classify,
    Challenge,
}

impl Section {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Compare => "compare",
            Self::Classify => "classify",
            Self::Challenge => "challenge",
        }
    }

    /// Parse a persisted section identifier. Unknown values yield `None` so
    /// callers can fall back to the default.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Self::Home),
            "compare" => Some(Self::Compare),
            "classify" => Some(Self::Classify),
            "challenge" => Some(Self::Challenge),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_sections() {
        for section in [
            Section::Home,
            Section::Compare,
            Section::Classify,
            Section::Challenge,
        ] {
            assert_eq!(Section::from_str(section.as_str()), Some(section));
        }
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert_eq!(Section::from_str("settings"), None);
    }
}
