//! Alias occurrence counting used to pick the synonyms a paper actually uses.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Most synonyms carried into the prompts.
pub const MAX_SYNONYMS: usize = 3;

static LETTERS_THEN_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("static pattern compiles")
});

/// Count case-insensitive occurrences of `alias` that are not embedded in a
/// longer alphanumeric token. `EBA181` also matches `EBA-181`.
pub fn count_occurrences(text: &str, alias: &str) -> usize {
    if alias.is_empty() {
        return 0;
    }
    let core = match LETTERS_THEN_DIGITS.captures(alias) {
        Some(caps) => format!("{}-?{}", regex::escape(&caps[1]), regex::escape(&caps[2])),
        None => regex::escape(alias),
    };
    let Ok(pattern) = RegexBuilder::new(&core).case_insensitive(true).build() else {
        return 0;
    };

    let mut count = 0;
    let mut pos = 0;
    while let Some(found) = pattern.find_at(text, pos) {
        let before = text[..found.start()].chars().next_back();
        let after = text[found.end()..].chars().next();
        if !is_word_char(before) && !is_word_char(after) {
            count += 1;
            pos = found.end();
        } else {
            // Retry one character later; a shorter overlapping match may qualify.
            let step = text[found.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            pos = found.start() + step;
        }
    }
    count
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_ascii_alphanumeric())
}

/// Pick up to [`MAX_SYNONYMS`] aliases that occur in `text`, most frequent
/// first. The gene id itself is never returned. Ties sort alphabetically.
pub fn rank_synonyms(gene_id: &str, aliases: &[String], text: &str) -> Vec<String> {
    let unique: BTreeSet<&str> = aliases
        .iter()
        .map(String::as_str)
        .filter(|alias| *alias != gene_id)
        .collect();

    let counts: HashMap<&str, usize> = unique
        .iter()
        .map(|alias| (*alias, count_occurrences(text, alias)))
        .filter(|(_, n)| *n > 0)
        .collect();

    let mut ranked: Vec<&str> = unique.into_iter().filter(|a| counts.contains_key(a)).collect();
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked
        .into_iter()
        .take(MAX_SYNONYMS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_standalone_case_insensitive_matches() {
        let text = "AMA1 binds RON2. ama1 knockdown failed. (AMA1)";
        assert_eq!(count_occurrences(text, "AMA1"), 3);
    }

    #[test]
    fn ignores_embedded_matches() {
        assert_eq!(count_occurrences("PfAMA1 and AMA12 are different", "AMA1"), 0);
    }

    #[test]
    fn letters_then_digits_allow_a_hyphen() {
        let text = "EBA181 and EBA-181 and eba-181.";
        assert_eq!(count_occurrences(text, "EBA181"), 3);
    }

    #[test]
    fn hyphen_is_not_optional_for_other_shapes() {
        assert_eq!(count_occurrences("PF3D7-1133400", "PF3D7_1133400"), 0);
    }

    #[test]
    fn special_characters_are_literal() {
        assert_eq!(count_occurrences("MSP-1(19) was detected", "MSP-1(19)"), 1);
        assert_eq!(count_occurrences("MSPx1(19)", "MSP.1(19)"), 0);
    }

    #[test]
    fn retries_after_a_rejected_candidate() {
        // Both candidates inside "aaa" touch another letter.
        assert_eq!(count_occurrences("aaa aa", "aa"), 1);
    }

    #[test]
    fn empty_alias_counts_nothing() {
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn multibyte_text_is_handled() {
        assert_eq!(count_occurrences("\u{3b1}AMA1 \u{e9}AMA1\u{e9}", "AMA1"), 2);
    }

    #[test]
    fn ranking_orders_by_frequency_and_caps_at_three() {
        let aliases: Vec<String> = ["AMA1", "AMA-1", "PF3D7_1133400", "RON2", "MSP1", "EBA175", "absent"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let text = "AMA1 AMA1 AMA1 RON2 RON2 MSP1 EBA175 PF3D7_1133400 PF3D7_1133400";
        let ranked = rank_synonyms("PF3D7_1133400", &aliases, text);
        assert_eq!(ranked, vec!["AMA1", "RON2", "EBA175"]);
    }

    #[test]
    fn ranking_deduplicates_aliases() {
        let aliases = vec!["RON2".to_string(), "RON2".to_string()];
        assert_eq!(rank_synonyms("X", &aliases, "RON2"), vec!["RON2"]);
    }
}
