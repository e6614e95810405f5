use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A named non-player character as far as text generation cares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub gender: Option<String>,
}

/// Character name → gender tag. The reserved name `"player"` is the
/// fallback for player pronouns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterRoster {
    characters: FxHashMap<String, Character>,
}

impl CharacterRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, gender: impl Into<String>) {
        self.characters.insert(
            name.into(),
            Character {
                gender: Some(gender.into()),
            },
        );
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, gender: impl Into<String>) -> Self {
        self.insert(name, gender);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.get(name)
    }

    pub fn gender_of(&self, name: &str) -> Option<&str> {
        self.characters.get(name)?.gender.as_deref()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Pronoun key → (gender tag → replacement).
///
/// Keys are stored lowercase; lookups are expected to lowercase too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PronounTable {
    entries: FxHashMap<String, FxHashMap<String, String>>,
}

impl PronounTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        gender: impl Into<String>,
        replacement: impl Into<String>,
    ) {
        self.entries
            .entry(key.into().to_lowercase())
            .or_default()
            .insert(gender.into(), replacement.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        key: impl Into<String>,
        gender: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.insert(key, gender, replacement);
        self
    }

    /// The per-gender replacements for a pronoun key.
    pub fn mapping(&self, key: &str) -> Option<&FxHashMap<String, String>> {
        self.entries.get(key)
    }

    pub fn lookup(&self, key: &str, gender: &str) -> Option<&str> {
        self.entries.get(key)?.get(gender).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// English pronouns for every [`PronounSet`], keyed by both the
    /// they/them forms and the he/him forms.
    ///
    /// `[his]` is the possessive determiner; use `[theirs]` for the
    /// standalone form.
    pub fn english() -> Self {
        const THEY_KEYS: [&str; 5] = ["they", "them", "their", "theirs", "themselves"];
        const HE_KEYS: [Option<&str>; 5] = [Some("he"), Some("him"), Some("his"), None, Some("himself")];

        let mut table = Self::new();
        for set in PronounSet::ALL {
            let gender = set.gender();
            for ((they_key, he_key), form) in THEY_KEYS.into_iter().zip(HE_KEYS).zip(set.forms()) {
                table.insert(they_key, gender, form);
                if let Some(he_key) = he_key {
                    table.insert(he_key, gender, form);
                }
            }
        }
        table
    }
}

/// The pronoun sets behind [`PronounTable::english`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PronounSet {
    SheHer,
    HeHim,
    TheyThem,
    ItIts,
}

impl PronounSet {
    pub const ALL: [PronounSet; 4] = [Self::SheHer, Self::HeHim, Self::TheyThem, Self::ItIts];

    /// The gender tag this set is registered under.
    pub fn gender(self) -> &'static str {
        match self {
            Self::SheHer => "female",
            Self::HeHim => "male",
            Self::TheyThem => "neutral",
            Self::ItIts => "neuter",
        }
    }

    /// Subject, object, possessive determiner, standalone possessive and
    /// reflexive, in that order.
    pub fn forms(self) -> [&'static str; 5] {
        match self {
            Self::SheHer => ["she", "her", "her", "hers", "herself"],
            Self::HeHim => ["he", "him", "his", "his", "himself"],
            Self::TheyThem => ["they", "them", "their", "theirs", "themselves"],
            Self::ItIts => ["it", "it", "its", "its", "itself"],
        }
    }
}
