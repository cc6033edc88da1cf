//! Lexer: raw formula text to tokens and a variable table.
//!
//! Connectives may be written in ASCII, Unicode, or LaTeX style; all
//! spellings of a connective produce the same [`TokenKind`]. Recognition is
//! greedy: at every position the longest matching spelling wins, so e.g.
//! `<->` is never split into `<` and `->`, and `\top` is never read as `\to`
//! followed by a variable `p`.
//!
//! Variables are collected while scanning and then sorted by name. Variable
//! tokens always carry the index of their name in the *sorted* table.
//!
//! # Example
//!
//! ```
//! use truthtable_rs::lexer::scan;
//! use truthtable_rs::token::TokenKind;
//!
//! let scanned = scan("q ∧ p").unwrap();
//! assert_eq!(scanned.variables, vec!["p", "q"]);
//! assert_eq!(scanned.tokens[1].kind, TokenKind::And);
//! assert_eq!(scanned.tokens.last().unwrap().kind, TokenKind::End);
//! ```

use std::collections::HashMap;

use log::debug;

use crate::error::{ErrorKind, Result};
use crate::token::{Token, TokenKind};
use crate::types::{Span, Var};

/// Appended after the input so every rule may look one character ahead.
/// The integrity check rejects it in user input.
const END: char = '\0';

/// Non-alphanumeric characters that may appear in a formula.
const GLYPHS: &str = "/\\&|^~!-><=()∧∨→↔¬⊤⊥";

/// Words that match the identifier pattern but denote connectives or constants.
const RESERVED: [&str; 9] = ["T", "F", "and", "or", "not", "iff", "implies", "true", "false"];

/// All accepted spellings, ordered by decreasing length (in chars).
const SPELLINGS: &[(&str, TokenKind)] = &[
    ("\\leftrightarrow", TokenKind::Iff),
    ("\\Leftrightarrow", TokenKind::Iff),
    ("\\rightarrow", TokenKind::Implies),
    ("\\Rightarrow", TokenKind::Implies),
    ("implies", TokenKind::Implies),
    ("\\wedge", TokenKind::And),
    ("\\land", TokenKind::And),
    ("\\lnot", TokenKind::Not),
    ("false", TokenKind::False),
    ("\\lor", TokenKind::Or),
    ("\\vee", TokenKind::Or),
    ("\\neg", TokenKind::Not),
    ("\\top", TokenKind::True),
    ("\\bot", TokenKind::False),
    ("true", TokenKind::True),
    ("\\to", TokenKind::Implies),
    ("and", TokenKind::And),
    ("<->", TokenKind::Iff),
    ("<=>", TokenKind::Iff),
    ("iff", TokenKind::Iff),
    ("not", TokenKind::Not),
    ("/\\", TokenKind::And),
    ("&&", TokenKind::And),
    ("\\/", TokenKind::Or),
    ("||", TokenKind::Or),
    ("or", TokenKind::Or),
    ("->", TokenKind::Implies),
    ("=>", TokenKind::Implies),
    ("^", TokenKind::And),
    ("∧", TokenKind::And),
    ("∨", TokenKind::Or),
    ("→", TokenKind::Implies),
    ("↔", TokenKind::Iff),
    ("~", TokenKind::Not),
    ("!", TokenKind::Not),
    ("¬", TokenKind::Not),
    ("T", TokenKind::True),
    ("⊤", TokenKind::True),
    ("F", TokenKind::False),
    ("⊥", TokenKind::False),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
];

/// Output of [`scan`]: the token stream and the sorted variable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    /// Tokens in source order, terminated by a single [`TokenKind::End`].
    pub tokens: Vec<Token>,
    /// Distinct variable names, sorted; token indices point into this table.
    pub variables: Vec<String>,
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || GLYPHS.contains(c)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Length (in chars) of `spelling` if `chars` starts with it.
fn match_len(chars: &[char], spelling: &str) -> Option<usize> {
    let mut len = 0;
    for expected in spelling.chars() {
        if chars.get(len) != Some(&expected) {
            return None;
        }
        len += 1;
    }
    Some(len)
}

/// Converts `input` into tokens and a sorted variable table.
///
/// # Errors
///
/// - [`ErrorKind::IllegalCharacter`] for the first character outside the
///   accepted alphabet (letters, digits, `_`, whitespace, operator glyphs);
/// - [`ErrorKind::UnexpectedCharacter`] for an accepted character that
///   begins no token, e.g. a digit at the start of a word or a lone `&`.
pub fn scan(input: &str) -> Result<Scanned> {
    let mut chars: Vec<char> = input.chars().collect();
    if let Some(pos) = chars.iter().position(|&c| !is_allowed(c)) {
        return Err(ErrorKind::IllegalCharacter(chars[pos]).at(Span::single(pos)));
    }
    chars.push(END);

    let mut lexer = Lexer::new(chars);
    lexer.run()?;
    let scanned = lexer.finish();
    debug!(
        "scan: {} tokens, variables = {:?}",
        scanned.tokens.len(),
        scanned.variables
    );
    Ok(scanned)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
    /// Variable names in order of first occurrence.
    names: Vec<String>,
    /// Name -> index into `names`.
    seen: HashMap<String, usize>,
}

impl Lexer {
    fn new(chars: Vec<char>) -> Self {
        Self {
            chars,
            pos: 0,
            tokens: Vec::new(),
            names: Vec::new(),
            seen: HashMap::new(),
        }
    }

    fn emit(&mut self, kind: TokenKind, len: usize) {
        self.tokens.push(Token::new(kind, Span::new(self.pos, self.pos + len)));
        self.pos += len;
    }

    fn run(&mut self) -> Result<()> {
        loop {
            let c = self.chars[self.pos];
            if c == END {
                self.emit(TokenKind::End, 0);
                return Ok(());
            }

            if let Some(name) = self.identifier() {
                let len = name.len();
                let var = self.intern(name);
                self.emit(TokenKind::Var(var), len);
            } else if let Some((kind, len)) = self.operator() {
                self.emit(kind, len);
            } else if c.is_whitespace() {
                self.pos += 1;
            } else {
                return Err(ErrorKind::UnexpectedCharacter(c).at(Span::single(self.pos)));
            }
        }
    }

    /// The variable name starting at the current position, unless the word
    /// there is reserved.
    fn identifier(&self) -> Option<String> {
        let rest = &self.chars[self.pos..];
        if !is_ident_start(rest[0]) {
            return None;
        }
        let name: String = rest.iter().take_while(|&&c| is_ident_continue(c)).collect();
        if RESERVED.contains(&name.as_str()) {
            None
        } else {
            Some(name)
        }
    }

    fn operator(&self) -> Option<(TokenKind, usize)> {
        let rest = &self.chars[self.pos..];
        SPELLINGS
            .iter()
            .find_map(|&(spelling, kind)| match_len(rest, spelling).map(|len| (kind, len)))
    }

    /// Temporary index (order of first occurrence); rewritten in `finish`.
    fn intern(&mut self, name: String) -> Var {
        if let Some(&index) = self.seen.get(&name) {
            return Var::new(index);
        }
        let index = self.names.len();
        self.seen.insert(name.clone(), index);
        self.names.push(name);
        Var::new(index)
    }

    fn finish(self) -> Scanned {
        let Lexer { mut tokens, mut names, .. } = self;

        let mut order: Vec<usize> = (0..names.len()).collect();
        order.sort_by(|&a, &b| names[a].cmp(&names[b]));

        let mut remap = vec![0; names.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = new;
        }

        for token in tokens.iter_mut() {
            if let TokenKind::Var(var) = &mut token.kind {
                *var = Var::new(remap[var.index()]);
            }
        }

        let variables = order.iter().map(|&i| std::mem::take(&mut names[i])).collect();
        Scanned { tokens, variables }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        scan(input).unwrap().tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_spellings_longest_first() {
        for pair in SPELLINGS.windows(2) {
            let (a, b) = (pair[0].0, pair[1].0);
            assert!(
                a.chars().count() >= b.chars().count(),
                "{:?} must come before {:?}",
                b,
                a
            );
        }
    }

    #[test]
    fn test_every_spelling_is_recognized() {
        for &(spelling, kind) in SPELLINGS {
            assert_eq!(kinds(spelling), vec![kind, TokenKind::End], "spelling {:?}", spelling);
        }
    }

    #[test]
    fn test_empty_input() {
        let scanned = scan("").unwrap();
        assert_eq!(scanned.tokens, vec![Token::new(TokenKind::End, Span::empty(0))]);
        assert!(scanned.variables.is_empty());
    }

    #[test]
    fn test_variables_sorted_and_reindexed() {
        let scanned = scan("zeta or alpha and zeta or m_1").unwrap();
        assert_eq!(scanned.variables, vec!["alpha", "m_1", "zeta"]);
        let vars: Vec<usize> = scanned
            .tokens
            .iter()
            .filter_map(|t| match t.kind {
                TokenKind::Var(v) => Some(v.index()),
                _ => None,
            })
            .collect();
        assert_eq!(vars, vec![2, 0, 2, 1]);
    }

    #[test]
    fn test_spans_count_chars() {
        let scanned = scan("p ∧ ¬q").unwrap();
        let spans: Vec<_> = scanned.tokens.iter().map(|t| t.span.range()).collect();
        assert_eq!(spans, vec![0..1, 2..3, 4..5, 5..6, 6..6]);
    }

    #[test]
    fn test_maximal_munch() {
        assert_eq!(
            kinds("p<->q"),
            vec![
                TokenKind::Var(Var::new(0)),
                TokenKind::Iff,
                TokenKind::Var(Var::new(1)),
                TokenKind::End
            ]
        );
        assert_eq!(
            kinds("\\top\\to p"),
            vec![TokenKind::True, TokenKind::Implies, TokenKind::Var(Var::new(0)), TokenKind::End]
        );
        assert_eq!(kinds("\\lnotp"), vec![TokenKind::Not, TokenKind::Var(Var::new(0)), TokenKind::End]);
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(
            kinds("T F true false"),
            vec![TokenKind::True, TokenKind::False, TokenKind::True, TokenKind::False, TokenKind::End]
        );
        // Words merely containing a reserved word are variables.
        let scanned = scan("andy or Tx or notp or True").unwrap();
        assert_eq!(scanned.variables, vec!["True", "Tx", "andy", "notp"]);
    }

    #[test]
    fn test_keywords_need_word_boundary() {
        // "pandq" is a single variable, not "p and q".
        let scanned = scan("pandq").unwrap();
        assert_eq!(scanned.variables, vec!["pandq"]);
        assert_eq!(scanned.tokens.len(), 2);
    }

    #[test]
    fn test_illegal_character() {
        let err = scan("p # q").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalCharacter('#'));
        assert_eq!(err.span(), Span::single(2));

        let err = scan("p ∧ é").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalCharacter('é'));
        assert_eq!(err.span(), Span::single(4));
    }

    #[test]
    fn test_sentinel_character_is_illegal() {
        let err = scan("p\0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalCharacter('\0'));
        assert_eq!(err.span(), Span::single(1));
    }

    #[test]
    fn test_unexpected_character() {
        let err = scan("p & q").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter('&'));
        assert_eq!(err.span(), Span::single(2));

        let err = scan("1p").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter('1'));
        assert_eq!(err.span(), Span::single(0));

        let err = scan("p \\foo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter('\\'));
    }

    #[test]
    fn test_incomplete_multi_char_spellings() {
        for c in ['|', '<', '=', '-', '&'] {
            let input = format!("p {} q", c);
            let err = scan(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter(c), "{:?}", input);
            assert_eq!(err.span(), Span::single(2), "{:?}", input);
        }

        // "<-" and "<=" are not spellings on their own.
        let err = scan("p <- q").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter('<'));
        let err = scan("p <= q").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter('<'));
    }

    #[test]
    fn test_latex_command_followed_by_letter() {
        // Commands need no word boundary, so `\topp` is `\top` followed by `p`.
        let scanned = scan("\\topp").unwrap();
        let tokens: Vec<_> = scanned.tokens.iter().map(|t| (t.kind, t.span.range())).collect();
        assert_eq!(
            tokens,
            vec![
                (TokenKind::True, 0..4),
                (TokenKind::Var(Var::new(0)), 4..5),
                (TokenKind::End, 5..5)
            ]
        );
    }
}
