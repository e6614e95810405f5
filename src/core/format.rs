/// Text formatter: raw authored text to display markup.
///
/// Pipeline, in this order:
/// 1. style delimiters (`__`, `**`, `*`, `~~`) to tags,
/// 2. newlines to line-break markers,
/// 3. pronoun substitution.
///
/// Pronouns run last so bracket tokens never meet the delimiter scan.
use crate::core::pronoun::PronounSubstitution;
use crate::schema::roster::{CharacterRoster, PronounTable};
use crate::schema::state::Player;

/// Delimiter → tag, applied in this order. `**` must precede `*`.
pub const STYLE_MARKUP: [(&str, &str); 4] = [
    ("__", "u"),
    ("**", "b"),
    ("*", "i"),
    ("~~", "strike"),
];

/// Replacement for every newline.
pub const LINE_BREAK: &str = "<br>";

/// Replace each occurrence of `delimiter` left-to-right, alternating
/// between `<tag>` and `</tag>`.
///
/// Toggling ignores nesting and other delimiters. An odd number of
/// delimiters leaves the last tag open.
pub fn add_style_tags(text: &str, delimiter: &str, tag: &str) -> String {
    if delimiter.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    let mut open = true;
    for (pos, _) in text.match_indices(delimiter) {
        out.push_str(&text[last..pos]);
        if open {
            out.push('<');
        } else {
            out.push_str("</");
        }
        out.push_str(tag);
        out.push('>');
        open = !open;
        last = pos + delimiter.len();
    }
    out.push_str(&text[last..]);
    out
}

/// Formats node text for display.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter<'a> {
    pronouns: PronounSubstitution<'a>,
}

impl<'a> TextFormatter<'a> {
    pub fn new(roster: &'a CharacterRoster, table: &'a PronounTable, player: &'a Player) -> Self {
        Self {
            pronouns: PronounSubstitution::new(roster, table, player),
        }
    }

    pub fn format(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for (delimiter, tag) in STYLE_MARKUP {
            text = add_style_tags(&text, delimiter, tag);
        }
        let text = text.replace('\n', LINE_BREAK);
        self.pronouns.apply(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_plain(raw: &str) -> String {
        let roster = CharacterRoster::new();
        let table = PronounTable::new();
        let player = Player::default();
        TextFormatter::new(&roster, &table, &player).format(raw)
    }

    #[test]
    fn bold_pair() {
        assert_eq!(add_style_tags("**test**", "**", "b"), "<b>test</b>");
    }

    #[test]
    fn odd_count_leaves_tag_open() {
        assert_eq!(add_style_tags("a *b* c *d", "*", "i"), "a <i>b</i> c <i>d");
    }

    #[test]
    fn toggle_ignores_nesting() {
        // Position decides open/close, not structure.
        assert_eq!(
            add_style_tags("*a *b* c*", "*", "i"),
            "<i>a </i>b<i> c</i>"
        );
    }

    #[test]
    fn no_delimiter_is_identity() {
        assert_eq!(add_style_tags("plain text", "~~", "strike"), "plain text");
    }

    #[test]
    fn all_markup_kinds_and_newline() {
        let out = format_plain("**bold** *italic*\n__underline__ ~~strike~~");
        assert_eq!(
            out,
            "<b>bold</b> <i>italic</i><br><u>underline</u> <strike>strike</strike>"
        );
        assert_eq!(out.matches(LINE_BREAK).count(), 1);
    }

    #[test]
    fn double_asterisk_is_consumed_before_single() {
        assert_eq!(format_plain("***x***"), "<b><i>x</b></i>");
    }

    #[test]
    fn mixed_kinds_close_by_position() {
        assert_eq!(
            format_plain("**a *b** c*"),
            "<b>a <i>b</b> c</i>"
        );
    }

    #[test]
    fn every_newline_becomes_a_break() {
        assert_eq!(format_plain("a\n\nb"), "a<br><br>b");
    }

    #[test]
    fn pronouns_applied_after_markup() {
        let roster = CharacterRoster::new().with("sarah", "female");
        let table = PronounTable::english();
        let player = Player::default();
        let formatter = TextFormatter::new(&roster, &table, &player);
        assert_eq!(
            formatter.format("**[sarah.They]** left.\nAlone."),
            "<b>She</b> left.<br>Alone."
        );
    }
}
