use std::fmt;

use fancy_regex::Regex;
use lazy_static::lazy_static;

use crate::base::Preprocessor;

const TICKER_PATTERN: &str = r"\$[a-zA-Z]+";
const USER_PATTERN: &str = r"@\w+";
const LINK_PATTERN: &str = r"https?://[^\s]+";
// a number glued to a `$` on either side, unless it is a percentage
const PRICE_SIGN_PATTERN: &str = r"\$(?!\d*\.?\d+%)\d*\.?\d+|(?!\d*\.?\d+%)\d*\.?\d+\$";
const PRICE_NOSIGN_PATTERN: &str = r"(?!\d*\.?\d+%)(?!\d*\.?\d+k)\d*\.?\d+";
const NUMBER_PATTERN: &str = r"[-+]?(?![0-9]*\.?[0-9]+%)[0-9]+";
const HTML_ENTITY_PATTERN: &str = r"&\w+";

lazy_static! {
    static ref TICKER: Regex = Regex::new(TICKER_PATTERN).unwrap();
    static ref USER: Regex = Regex::new(USER_PATTERN).unwrap();
    static ref LINK: Regex = Regex::new(LINK_PATTERN).unwrap();
    static ref PRICE_SIGN: Regex = Regex::new(PRICE_SIGN_PATTERN).unwrap();
    static ref PRICE_NOSIGN: Regex = Regex::new(PRICE_NOSIGN_PATTERN).unwrap();
    static ref NUMBER: Regex = Regex::new(NUMBER_PATTERN).unwrap();
    static ref HTML_ENTITY: Regex = Regex::new(HTML_ENTITY_PATTERN).unwrap();
}

/// Symbolic stand-ins for whole classes of raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedToken {
    Ticker,
    User,
    Link,
    Price,
    Number,
}

impl ReservedToken {
    pub const ALL: [ReservedToken; 5] = [
        ReservedToken::Ticker,
        ReservedToken::User,
        ReservedToken::Link,
        ReservedToken::Price,
        ReservedToken::Number,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservedToken::Ticker => "<TICKER>",
            ReservedToken::User => "<USER>",
            ReservedToken::Link => "<LINK>",
            ReservedToken::Price => "<PRICE>",
            ReservedToken::Number => "<NUMBER>",
        }
    }

    /// Matches the literal token text exactly, brackets included.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == token)
    }

    // the padded form keeps the token from fusing with its neighbours
    fn replacement(self) -> String {
        format!(" {} ", self.as_str())
    }
}

impl fmt::Display for ReservedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace every non-overlapping match of `re` in `text` with `rep`.
///
/// The regex engine can fail at match time (backtrack limit). When it does,
/// the remainder of the text is kept as is so that normalization stays total.
fn substitute(re: &Regex, text: &str, rep: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in re.find_iter(text) {
        match found {
            Ok(m) => {
                out.push_str(&text[last..m.start()]);
                out.push_str(rep);
                last = m.end();
            }
            Err(err) => {
                tracing::warn!(pattern = re.as_str(), %err, "regex match aborted, keeping text");
                break;
            }
        }
    }
    out.push_str(&text[last..]);
    out
}

fn is_stripped_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() && c != '<' && c != '>'
}

// Keep letters, digits, brackets and whitespace. The ASCII information
// separators count as whitespace; every other control character goes.
fn clean_char(c: char) -> Option<char> {
    match c {
        '\x1c'..='\x1f' => Some(' '),
        c if !c.is_ascii() || is_stripped_punctuation(c) => None,
        c if c.is_ascii_control() && !c.is_whitespace() => None,
        c => Some(c),
    }
}

/// Turn one raw message into space-joined semantic tokens.
///
/// The substitution order matters: the price rules must run after tickers
/// have consumed `$word`, and punctuation is only stripped once every
/// `$`, `@`, `&` and `%` has been interpreted.
pub fn normalize(raw: &str) -> String {
    let text = raw.to_lowercase();

    let text = substitute(&TICKER, &text, &ReservedToken::Ticker.replacement());
    let text = substitute(&USER, &text, &ReservedToken::User.replacement());
    let text = substitute(&LINK, &text, &ReservedToken::Link.replacement());
    let text = substitute(&PRICE_SIGN, &text, &ReservedToken::Price.replacement());
    let text = substitute(&PRICE_NOSIGN, &text, &ReservedToken::Number.replacement());
    let text = substitute(&NUMBER, &text, &ReservedToken::Number.replacement());

    let text: String = substitute(&HTML_ENTITY, &text, "")
        .chars()
        .filter_map(clean_char)
        .collect();

    text.split_whitespace()
        .filter_map(|token| {
            if ReservedToken::parse(token).is_some() {
                return Some(token.to_string());
            }
            let word: String = token.chars().filter(|&c| c != '<' && c != '>').collect();
            (!word.is_empty()).then_some(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn normalize_all<S: AsRef<str>>(raws: &[S]) -> Vec<String> {
    raws.iter().map(|raw| normalize(raw.as_ref())).collect()
}

/// The financial-message normalizer as a pluggable [`Preprocessor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Preprocessor for Normalizer {
    fn normalize(&self, text: &str) -> String {
        normalize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokens(s: &str) -> Vec<String> {
        normalize(s).split(' ').filter(|t| !t.is_empty()).map(String::from).collect()
    }

    fn count(tokens: &[String], r: ReservedToken) -> usize {
        tokens.iter().filter(|t| t.as_str() == r.as_str()).count()
    }

    #[test]
    fn test_ticker_link_and_percentage() {
        let toks = tokens("Check out $AAPL, up 5% today! https://x.co");
        assert_eq!(count(&toks, ReservedToken::Ticker), 1);
        assert_eq!(count(&toks, ReservedToken::Link), 1);
        assert_eq!(count(&toks, ReservedToken::Price), 0);
        assert_eq!(count(&toks, ReservedToken::Number), 0);
        assert_eq!(
            toks,
            vec!["check", "out", "<TICKER>", "up", "5", "today", "<LINK>"]
        );
    }

    #[test]
    fn test_prices_with_sign() {
        let toks = tokens("Bought at $150.25, target $160");
        assert_eq!(count(&toks, ReservedToken::Price), 2);
        assert_eq!(toks, vec!["bought", "at", "<PRICE>", "target", "<PRICE>"]);
    }

    #[test]
    fn test_trailing_dollar_sign_is_a_price() {
        assert_eq!(normalize("sold 12.5$ each"), "sold <PRICE> each");
    }

    #[test]
    fn test_bare_numbers() {
        assert_eq!(normalize("holding 300 shares"), "holding <NUMBER> shares");
        assert_eq!(normalize("down -4 points"), "down <NUMBER> points");
    }

    #[test]
    fn test_decimal_percentage_is_kept_literal() {
        assert_eq!(normalize("up 2.5% premarket"), "up 25 premarket");
    }

    #[test]
    fn test_user_mention() {
        assert_eq!(normalize("@trader42 agreed"), "<USER> agreed");
    }

    #[test]
    fn test_html_entities_and_non_ascii() {
        assert_eq!(normalize("buy &amp; hold 🚀 café"), "buy hold caf");
    }

    #[test]
    fn test_stray_angle_brackets_are_stripped() {
        // lowercasing runs first, so a literal "<TICKER>" in raw text is just a word
        assert_eq!(normalize("a<b> <x> <TICKER>"), "ab x ticker");
        assert_eq!(normalize("<> <<>>"), "");
    }

    #[test]
    fn test_only_noise_is_empty() {
        assert_eq!(normalize("!!! ... ???"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }

    #[test]
    fn test_mentions_and_links_only() {
        assert_eq!(normalize("@a https://t.co/x"), "<USER> <LINK>");
    }

    #[test]
    fn test_reserved_token_parse() {
        for r in ReservedToken::ALL {
            assert_eq!(ReservedToken::parse(r.as_str()), Some(r));
        }
        assert_eq!(ReservedToken::parse("TICKER"), None);
        assert_eq!(ReservedToken::parse("<ticker>"), None);
    }

    #[test]
    fn test_number_with_k_suffix() {
        // skipped by the bare-number rule, caught by the integer rule
        assert_eq!(normalize("300k shares"), "<NUMBER> k shares");
    }

    #[test]
    fn test_dollar_percentage_is_not_a_price() {
        assert_eq!(normalize("$5% or $5"), "5 or <PRICE>");
    }

    #[test]
    fn test_signed_percentage_is_kept_literal() {
        assert_eq!(normalize("-5% drop"), "5 drop");
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(normalize("buy\u{1}now"), "buynow");
        assert_eq!(normalize("sell\u{7f} \u{0}"), "sell");
        assert_eq!(normalize("up\u{1c}down\u{1f}flat"), "up down flat");
        assert_eq!(normalize("a\tb\u{b}c\u{c}d\r\ne"), "a b c d e");
    }

    #[test]
    fn test_preprocessor_trait() {
        let n = Normalizer;
        assert_eq!(n.normalize("$TSLA to the moon"), "<TICKER> to the moon");
    }

    proptest! {
        #[test]
        fn prop_normalize_alphabet(raw in "(?s).*|[\\x00-\\x7f]*") {
            let out = normalize(&raw);
            if out.is_empty() {
                return Ok(());
            }
            for tok in out.split(' ') {
                prop_assert!(!tok.is_empty());
                if ReservedToken::parse(tok).is_none() {
                    prop_assert!(tok.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                        "unexpected token {:?}", tok);
                }
            }
        }

        #[test]
        fn prop_normalize_is_stable_on_plain_words(words in proptest::collection::vec("[a-z]{1,8}", 0..10)) {
            let raw = words.join(" ");
            prop_assert_eq!(normalize(&raw), raw);
        }
    }
}
