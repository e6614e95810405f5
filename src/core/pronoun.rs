/// Gender-aware replacement of `[he]` / `[name.his]` tokens.
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::schema::roster::{CharacterRoster, PronounTable};
use crate::schema::state::Player;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]").expect("pronoun token pattern is valid")
});

/// Separator between a character name and a pronoun key.
const SEPARATOR: char = '.';

/// Roster name whose gender stands in for a player without one.
pub const PLAYER_ROSTER_NAME: &str = "player";

/// Read-only sources for pronoun substitution.
#[derive(Debug, Clone, Copy)]
pub struct PronounSubstitution<'a> {
    pub roster: &'a CharacterRoster,
    pub table: &'a PronounTable,
    pub player: &'a Player,
}

impl<'a> PronounSubstitution<'a> {
    pub fn new(roster: &'a CharacterRoster, table: &'a PronounTable, player: &'a Player) -> Self {
        Self {
            roster,
            table,
            player,
        }
    }

    /// Replace every resolvable token. Unresolvable tokens are kept
    /// verbatim, brackets included.
    pub fn apply(&self, text: &str) -> String {
        TOKEN
            .replace_all(text, |caps: &Captures<'_>| {
                self.resolve_token(&caps[1])
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn resolve_token(&self, token: &str) -> Option<String> {
        let (gender, key) = if token.matches(SEPARATOR).count() == 1 {
            let (name, key) = token.split_once(SEPARATOR)?;
            (self.roster.gender_of(name), key)
        } else {
            (self.player_gender(), token)
        };

        let replacement = self.table.lookup(&key.to_lowercase(), gender?)?;
        Some(match_case(key, replacement))
    }

    fn player_gender(&self) -> Option<&'a str> {
        self.player
            .gender
            .as_deref()
            .or_else(|| self.roster.gender_of(PLAYER_ROSTER_NAME))
    }
}

/// Uppercase the first character of `replacement` unless the key starts
/// lowercase.
fn match_case(key: &str, replacement: &str) -> String {
    let key_is_lower = key.chars().next().is_some_and(char::is_lowercase);
    if key_is_lower {
        return replacement.to_string();
    }

    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn he_table() -> PronounTable {
        PronounTable::new()
            .with("he", "male", "he")
            .with("he", "female", "she")
    }

    fn female_player() -> Player {
        Player {
            name: "Ava".to_string(),
            gender: Some("female".to_string()),
        }
    }

    #[test]
    fn character_scoped_token() {
        let roster = CharacterRoster::new().with("sarah", "female");
        let table = he_table();
        let player = Player::default();
        let subst = PronounSubstitution::new(&roster, &table, &player);
        assert_eq!(subst.apply("[sarah.he] left"), "she left");
    }

    #[test]
    fn player_token_keeps_capitalization() {
        let roster = CharacterRoster::new();
        let table = he_table();
        let player = female_player();
        let subst = PronounSubstitution::new(&roster, &table, &player);
        assert_eq!(subst.apply("[He] left"), "She left");
        assert_eq!(subst.apply("and [he] left"), "and she left");
    }

    #[test]
    fn two_separators_left_untouched() {
        let roster = CharacterRoster::new().with("doesnt", "female");
        let table = he_table();
        let player = female_player();
        let subst = PronounSubstitution::new(&roster, &table, &player);
        assert_eq!(subst.apply("[doesnt.match.this]"), "[doesnt.match.this]");
    }

    #[test]
    fn player_falls_back_to_roster_entry() {
        let roster = CharacterRoster::new().with("player", "male");
        let table = he_table();
        let player = Player::named("Wanderer");
        let subst = PronounSubstitution::new(&roster, &table, &player);
        assert_eq!(subst.apply("[he] waves"), "he waves");
    }

    #[test]
    fn player_gender_beats_roster_entry() {
        let roster = CharacterRoster::new().with("player", "male");
        let table = he_table();
        let player = female_player();
        let subst = PronounSubstitution::new(&roster, &table, &player);
        assert_eq!(subst.apply("[he]"), "she");
    }

    #[test]
    fn missing_mappings_are_silent() {
        let roster = CharacterRoster::new().with("sarah", "female");
        let table = he_table();
        let player = Player::default();
        let subst = PronounSubstitution::new(&roster, &table, &player);

        // unknown character
        assert_eq!(subst.apply("[tom.he]"), "[tom.he]");
        // unknown key
        assert_eq!(subst.apply("[sarah.xe]"), "[sarah.xe]");
        // player without any gender
        assert_eq!(subst.apply("[he]"), "[he]");
        // gender with no entry in the mapping
        let other = Player {
            name: String::new(),
            gender: Some("neutral".to_string()),
        };
        let subst = PronounSubstitution::new(&roster, &table, &other);
        assert_eq!(subst.apply("[he]"), "[he]");
    }

    #[test]
    fn character_key_case_drives_replacement_case() {
        let roster = CharacterRoster::new().with("sarah", "female");
        let table = PronounTable::english();
        let player = Player::default();
        let subst = PronounSubstitution::new(&roster, &table, &player);
        assert_eq!(
            subst.apply("[sarah.His] coat. Give it to [sarah.him]."),
            "Her coat. Give it to her."
        );
    }

    #[test]
    fn multiple_tokens_in_one_pass() {
        let roster = CharacterRoster::new().with("tom", "male");
        let table = PronounTable::english();
        let player = female_player();
        let subst = PronounSubstitution::new(&roster, &table, &player);
        assert_eq!(
            subst.apply("[They] handed [tom.them] [their] map."),
            "She handed him her map."
        );
    }
}
