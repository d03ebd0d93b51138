//! Speakable-text normalization.
//!
//! Chat messages are full of emoticons and symbols the synthesis engine
//! either skips or spells out badly. [`normalize`] rewrites them into short
//! spoken phrases before the text reaches the engine.
//!
//! Rewriting happens in two ordered passes:
//!
//! 1. multi-character emoticons and slang, in table order, so that a
//!    composite like `<3` is consumed before its `<` could be read alone;
//! 2. single special characters, each replaced by a space-padded word.
//!
//! Everything else passes through untouched, including letters, digits,
//! punctuation not listed here, and surrounding whitespace. Replacement
//! words never contain a pattern character, so later rules never rewrite
//! the output of earlier ones.

/// How a pattern is compared against the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Exact,
    /// ASCII case-insensitive.
    Ignore,
}

/// Composite patterns, applied in order.
const PHRASES: &[(&str, &str, Case)] = &[
    ("<3", " сердечко ", Case::Exact),
    ("♥", " сердечко ", Case::Exact),
    ("</3", " разбитое сердце ", Case::Exact),
    (":3", " котик ", Case::Exact),
    (":)", " улыбка ", Case::Exact),
    (":(", " грустно ", Case::Exact),
    (":|", " нейтрально ", Case::Exact),
    ("XD", " смеюсь ", Case::Ignore),
    (";)", " подмигиваю ", Case::Exact),
    (":*", " целую ", Case::Exact),
    (":/", " смущаюсь ", Case::Exact),
    (":D", " очень радуюсь ", Case::Exact),
    (":P", " показываю язык ", Case::Ignore),
    ("^_^", " счастлив ", Case::Exact),
    ("о/", " машу рукой ", Case::Exact),
    ("\\о", " машу рукой ", Case::Exact),
    ("lol", " лол ", Case::Ignore),
    ("rofl", " рофл ", Case::Ignore),
    ("omg", " о боже ", Case::Ignore),
    ("wtf", " вотэфэ ", Case::Ignore),
];

/// Spoken form of a single special character.
const fn symbol_word(c: char) -> Option<&'static str> {
    Some(match c {
        '<' => " меньше чем ",
        '>' => " больше чем ",
        '&' => " и ",
        '=' => " равно ",
        '+' => " плюс ",
        '-' => " минус ",
        '*' => " звёздочка ",
        '/' => " дробь ",
        '\\' => " обратная дробь ",
        '|' => " вертикальная черта ",
        '@' => " собачка ",
        '%' => " процент ",
        '#' => " решётка ",
        _ => return None,
    })
}

/// Rewrite emoticons, slang and special symbols into speakable words.
///
/// Total and deterministic. Callers trim the result and drop it if nothing
/// but whitespace remains.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_string();
    for &(pattern, word, case) in PHRASES {
        text = match case {
            Case::Exact => text.replace(pattern, word),
            Case::Ignore => replace_ignore_ascii_case(&text, pattern, word),
        };
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match symbol_word(c) {
            Some(word) => out.push_str(word),
            None => out.push(c),
        }
    }
    out
}

/// Replace every non-overlapping occurrence of an ASCII `pattern`, ignoring
/// ASCII case.
fn replace_ignore_ascii_case(haystack: &str, pattern: &str, replacement: &str) -> String {
    debug_assert!(pattern.is_ascii());
    let bytes = haystack.as_bytes();
    let needle = pattern.as_bytes();
    let mut out = String::with_capacity(haystack.len());
    let mut copied = 0;
    let mut i = 0;

    while i + needle.len() <= bytes.len() {
        if bytes[i..i + needle.len()].eq_ignore_ascii_case(needle) {
            // A match is pure ASCII, so both ends sit on char boundaries.
            out.push_str(&haystack[copied..i]);
            out.push_str(replacement);
            i += needle.len();
            copied = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&haystack[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heart_becomes_word() {
        assert_eq!(normalize("hello <3"), "hello  сердечко ");
    }

    #[test]
    fn plain_text_is_untouched() {
        let text = "Привет, как дела? 42 apples.";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn composite_wins_over_single_symbol() {
        assert_eq!(normalize("</3"), " разбитое сердце ");
        assert_eq!(normalize(":/"), " смущаюсь ");
        assert_eq!(normalize("a/b"), "a дробь b");
    }

    #[test]
    fn case_insensitive_slang() {
        assert_eq!(normalize("LoL"), " лол ");
        assert_eq!(normalize("xd"), " смеюсь ");
        assert_eq!(normalize(":p"), " показываю язык ");
        assert_eq!(normalize("OMG wtf"), " о боже   вотэфэ ");
    }

    #[test]
    fn colon_d_is_case_sensitive() {
        assert_eq!(normalize(":D"), " очень радуюсь ");
        assert_eq!(normalize(":d"), ":d");
    }

    #[test]
    fn cyrillic_wave() {
        assert_eq!(normalize("о/"), " машу рукой ");
        assert_eq!(normalize("\\о"), " машу рукой ");
    }

    #[test]
    fn symbols_only_collapse_to_words() {
        assert_eq!(normalize("2+2=4"), "2 плюс 2 равно 4");
        assert_eq!(normalize("@#%"), " собачка  решётка  процент ");
    }

    #[test]
    fn is_deterministic() {
        let input = "omg <3 :) a-b";
        assert_eq!(normalize(input), normalize(input));
    }

    #[test]
    fn ignore_case_replace_keeps_multibyte_text() {
        assert_eq!(
            replace_ignore_ascii_case("ёжLOLёж", "lol", "!"),
            "ёж!ёж"
        );
    }
}
