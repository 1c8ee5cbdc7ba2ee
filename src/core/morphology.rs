//! French morphology: pluralization, elision and preposition contraction.
//!
//! Everything here is a pure function over closed tables. The exception
//! lists are vocabulary, not spelling rules, and are kept verbatim.

use crate::schema::phrase::NounGroup;
use crate::schema::word::{Word, WordKind};

/// Letters that open a vowel sound at the start of a word.
const VOWELS: &[char] = &[
    'a', 'e', 'i', 'o', 'u', 'y', 'é', 'è', 'ê', 'à', 'â', 'î', 'ï', 'ô', 'û', 'ù',
];

/// `-al` words that take a plain `s`.
const AL_REGULAR: &[&str] = &[
    "aval", "bal", "banal", "bancal", "cal", "carnaval", "cérémonial", "choral", "étal", "fatal",
    "festival", "natal", "naval", "récital", "régal", "tonal", "pal", "val", "virginal",
];

/// `-ail` words that become `-aux`.
const AIL_TO_AUX: &[&str] = &[
    "bail", "corail", "émail", "gemmail", "soupirail", "travail", "vantail", "vitrail",
];

/// `-eu`/`-au` words that take a plain `s`.
const EU_AU_REGULAR: &[&str] = &["bleu", "émeu", "landau", "lieu", "pneu", "sarrau"];

/// `-ou` words that take an `x`.
const OU_TO_OUX: &[&str] = &["bijou", "caillou", "chou", "genou", "hibou", "joujou", "pou"];

const SPECIFIER_ELISIONS: &[(&str, &str)] = &[
    ("le", "l'"),
    ("la", "l'"),
    ("ce", "cet"),
    // Feminine possessives take the masculine form before a vowel.
    ("ma", "mon"),
    ("sa", "son"),
    ("ta", "ton"),
];

const ADJECTIVE_ELISIONS: &[(&str, &str)] =
    &[("beau", "bel"), ("nouveau", "nouvel"), ("vieux", "vieil")];

const CLITIC_ELISIONS: &[(&str, &str)] = &[
    ("je", "j'"),
    ("me", "m'"),
    ("te", "t'"),
    ("se", "s'"),
    ("ne", "n'"),
    ("que", "qu'"),
];

/// True if the word opens with a vowel sound.
pub fn starts_with_vowel(word: &str) -> bool {
    word.chars()
        .next()
        .and_then(|c| c.to_lowercase().next())
        .is_some_and(|c| VOWELS.contains(&c))
}

/// Plural form of a noun or adjective.
pub fn pluralize(word: &str) -> String {
    if word.ends_with(['s', 'z', 'x']) {
        return word.to_string();
    }

    let takes_x = (word.ends_with("au") || word.ends_with("eu") || OU_TO_OUX.contains(&word))
        && !EU_AU_REGULAR.contains(&word);
    if takes_x {
        return format!("{}x", word);
    }

    if let Some(stem) = word.strip_suffix("al") {
        if !AL_REGULAR.contains(&word) {
            return format!("{}aux", stem);
        }
    }

    if AIL_TO_AUX.contains(&word) {
        if let Some(stem) = word.strip_suffix("ail") {
            return format!("{}aux", stem);
        }
    }

    format!("{}s", word)
}

fn lookup(table: &[(&str, &'static str)], text: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == text)
        .map(|(_, to)| *to)
}

/// Registered pre-vowel form of a word, if it has one. Noun and plain
/// words never change.
pub fn elided_form(kind: WordKind, text: &str) -> Option<&'static str> {
    match kind {
        WordKind::Specifier => lookup(SPECIFIER_ELISIONS, text),
        WordKind::Adjective => lookup(ADJECTIVE_ELISIONS, text),
        WordKind::Clitic => lookup(CLITIC_ELISIONS, text),
        WordKind::Noun | WordKind::Plain => None,
    }
}

/// The form `text` takes in front of `following`.
pub fn elide<'a>(kind: WordKind, text: &'a str, following: &str) -> &'a str {
    if !starts_with_vowel(following) {
        return text;
    }
    elided_form(kind, text).unwrap_or(text)
}

/// Apply [`elide`] to a tagged word.
pub fn elide_word(word: &Word, following: &str) -> Word {
    Word::new(word.kind, elide(word.kind, &word.text, following))
}

/// Contract `à le`/`à les` into `au`/`aux`, dropping the specifier token
/// from the group. Runs after elision, so `à l'arbre` is left alone.
/// Returns the surface preposition.
pub fn contract_locative(preposition: &str, group: &mut NounGroup) -> String {
    if preposition != "à" {
        return preposition.to_string();
    }
    let contracted = match group.words.first() {
        Some(w) if w.kind == WordKind::Specifier && w.text == "le" => "au",
        Some(w) if w.kind == WordKind::Specifier && w.text == "les" => "aux",
        _ => return preposition.to_string(),
    };
    group.words.remove(0);
    contracted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::word::{Gender, Number};

    #[test]
    fn pluralize_unchanged_endings() {
        assert_eq!(pluralize("bois"), "bois");
        assert_eq!(pluralize("nez"), "nez");
        assert_eq!(pluralize("lumineux"), "lumineux");
        assert_eq!(pluralize("les"), "les");
    }

    #[test]
    fn pluralize_x_rule_and_exceptions() {
        assert_eq!(pluralize("chou"), "choux");
        assert_eq!(pluralize("oiseau"), "oiseaux");
        assert_eq!(pluralize("beau"), "beaux");
        assert_eq!(pluralize("pneu"), "pneus");
        assert_eq!(pluralize("bleu"), "bleus");
        assert_eq!(pluralize("landau"), "landaus");
        assert_eq!(pluralize("trou"), "trous");
    }

    #[test]
    fn pluralize_al_and_ail() {
        assert_eq!(pluralize("animal"), "animaux");
        assert_eq!(pluralize("festival"), "festivals");
        assert_eq!(pluralize("travail"), "travaux");
        assert_eq!(pluralize("vitrail"), "vitraux");
        assert_eq!(pluralize("rail"), "rails");
    }

    #[test]
    fn pluralize_default_s() {
        assert_eq!(pluralize("ordinateur"), "ordinateurs");
        assert_eq!(pluralize("rigolote"), "rigolotes");
    }

    #[test]
    fn vowel_detection() {
        assert!(starts_with_vowel("ordinateur"));
        assert!(starts_with_vowel("éternité"));
        assert!(starts_with_vowel("Est-ce"));
        assert!(!starts_with_vowel("tente"));
        assert!(!starts_with_vowel(""));
    }

    #[test]
    fn specifier_elision_table() {
        assert_eq!(elide(WordKind::Specifier, "le", "ordinateur"), "l'");
        assert_eq!(elide(WordKind::Specifier, "la", "arrivée"), "l'");
        assert_eq!(elide(WordKind::Specifier, "ce", "éternité"), "cet");
        assert_eq!(elide(WordKind::Specifier, "ma", "idée"), "mon");
        assert_eq!(elide(WordKind::Specifier, "ta", "arrivée"), "ton");
        assert_eq!(elide(WordKind::Specifier, "une", "idée"), "une");
        assert_eq!(elide(WordKind::Specifier, "le", "mot"), "le");
    }

    #[test]
    fn elision_branches_on_kind() {
        assert_eq!(elide(WordKind::Adjective, "beau", "arbre"), "bel");
        assert_eq!(elide(WordKind::Clitic, "je", "aime"), "j'");
        assert_eq!(elide(WordKind::Clitic, "que", "un"), "qu'");
        // Same spelling, no registered form for nouns.
        assert_eq!(elide(WordKind::Noun, "le", "ordinateur"), "le");
    }

    fn group(words: &[(&str, WordKind)]) -> NounGroup {
        NounGroup {
            specifier: words[0].0.to_string(),
            noun: words[1].0.to_string(),
            adjectives: Vec::new(),
            gender: Gender::Masculine,
            number: Number::Singular,
            words: words.iter().map(|(t, k)| Word::new(*k, *t)).collect(),
        }
    }

    #[test]
    fn locative_contraction() {
        let mut g = group(&[("le", WordKind::Specifier), ("mot", WordKind::Noun)]);
        assert_eq!(contract_locative("à", &mut g), "au");
        assert_eq!(g.texts().collect::<Vec<_>>(), vec!["mot"]);

        let mut g = group(&[("les", WordKind::Specifier), ("mots", WordKind::Noun)]);
        assert_eq!(contract_locative("à", &mut g), "aux");
        assert_eq!(g.words.len(), 1);

        let mut g = group(&[("l'", WordKind::Specifier), ("arbre", WordKind::Noun)]);
        assert_eq!(contract_locative("à", &mut g), "à");
        assert_eq!(g.words.len(), 2);

        let mut g = group(&[("le", WordKind::Specifier), ("mot", WordKind::Noun)]);
        assert_eq!(contract_locative("sur", &mut g), "sur");
        assert_eq!(g.words.len(), 2);
    }
}
