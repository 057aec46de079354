use super::*;
use crate::TokenKind::{
    Divide, EndOfInput, Exponent, Identifier, Invalid, LBrace, LBracket, LParen, Minus, Modulo,
    Multiply, Number, Plus, Power, RBrace, RBracket, RParen,
};
use pretty_assertions::assert_eq;

/// Helper: collapse a stream into `(kind, lexeme)` pairs.
fn pairs(stream: &TokenStream) -> Vec<(TokenKind, Option<String>)> {
    stream
        .iter()
        .map(|t| {
            (
                t.kind,
                t.lexeme.map(|b| String::from_utf8_lossy(b).into_owned()),
            )
        })
        .collect()
}

/// Helper: scan a string and return `(kind, lexeme)` pairs.
fn scan(source: &str) -> Vec<(TokenKind, Option<String>)> {
    let stream = lex(source.as_bytes()).expect("scan of a short input cannot exhaust memory");
    pairs(&stream)
}

/// Helper: expected pairs from `(kind, lexeme)` literals, with the end
/// marker appended.
fn expect(tokens: &[(TokenKind, &str)]) -> Vec<(TokenKind, Option<String>)> {
    tokens
        .iter()
        .map(|(kind, text)| (*kind, Some((*text).to_string())))
        .chain(std::iter::once((EndOfInput, None)))
        .collect()
}

// === Basic Expressions ===

#[test]
fn empty_input() {
    assert_eq!(scan(""), expect(&[]));
}

#[test]
fn whitespace_only_input() {
    assert_eq!(scan("   "), expect(&[]));
    assert_eq!(scan("   \t\n"), expect(&[]));
    assert_eq!(scan("\r\n \t"), expect(&[]));
}

#[test]
fn simple_expression() {
    assert_eq!(
        scan("1 + 2"),
        expect(&[(Number, "1"), (Plus, "+"), (Number, "2")])
    );
}

#[test]
fn no_spaces_needed_between_tokens() {
    assert_eq!(
        scan("1+2*x"),
        expect(&[
            (Number, "1"),
            (Plus, "+"),
            (Number, "2"),
            (Multiply, "*"),
            (Identifier, "x"),
        ])
    );
}

#[test]
fn identifier_and_operators() {
    assert_eq!(
        scan("foo123 * . + bar"),
        expect(&[
            (Identifier, "foo123"),
            (Multiply, "*"),
            (Number, "."),
            (Plus, "+"),
            (Identifier, "bar"),
        ])
    );
}

#[test]
fn all_binary_operators() {
    assert_eq!(
        scan("+ - * / % ^ **"),
        expect(&[
            (Plus, "+"),
            (Minus, "-"),
            (Multiply, "*"),
            (Divide, "/"),
            (Modulo, "%"),
            (Power, "^"),
            (Power, "**"),
        ])
    );
}

#[test]
fn operators_never_merge_except_double_star() {
    assert_eq!(
        scan("+-//%%"),
        expect(&[
            (Plus, "+"),
            (Minus, "-"),
            (Divide, "/"),
            (Divide, "/"),
            (Modulo, "%"),
            (Modulo, "%"),
        ])
    );
}

// === Numbers ===

#[test]
fn lone_dot_is_a_number() {
    assert_eq!(scan(" . "), expect(&[(Number, ".")]));
}

#[test]
fn decimal_forms() {
    assert_eq!(
        scan("1.5 .25 3. 0.0"),
        expect(&[
            (Number, "1.5"),
            (Number, ".25"),
            (Number, "3."),
            (Number, "0.0"),
        ])
    );
}

#[test]
fn consecutive_dots_split_numbers() {
    assert_eq!(scan(".."), expect(&[(Number, "."), (Number, ".")]));
    assert_eq!(scan("1.2.3"), expect(&[(Number, "1.2"), (Number, ".3")]));
}

#[test]
fn number_then_identifier() {
    assert_eq!(scan("12abc"), expect(&[(Number, "12"), (Identifier, "abc")]));
}

#[test]
fn identifier_then_dot_starts_number() {
    assert_eq!(scan("x.5"), expect(&[(Identifier, "x"), (Number, ".5")]));
}

// === Exponents ===

#[test]
fn exponent_sequence() {
    assert_eq!(
        scan("1e10"),
        expect(&[(Number, "1"), (Exponent, "e"), (Number, "10")])
    );
}

#[test]
fn exponent_with_sign() {
    assert_eq!(
        scan("3e-2"),
        expect(&[(Number, "3"), (Exponent, "e"), (Minus, "-"), (Number, "2")])
    );
    assert_eq!(
        scan("1e+"),
        expect(&[(Number, "1"), (Exponent, "e"), (Plus, "+")])
    );
}

#[test]
fn exponent_after_decimal() {
    assert_eq!(
        scan("2.5E3"),
        expect(&[(Number, "2.5"), (Exponent, "E"), (Number, "3")])
    );
}

#[test]
fn exponent_before_dot_and_open_bracket() {
    assert_eq!(
        scan("1e.5"),
        expect(&[(Number, "1"), (Exponent, "e"), (Number, ".5")])
    );
    assert_eq!(
        scan("1e(2)"),
        expect(&[
            (Number, "1"),
            (Exponent, "e"),
            (LParen, "("),
            (Number, "2"),
            (RParen, ")"),
        ])
    );
}

#[test]
fn trailing_e_is_identifier() {
    assert_eq!(scan("1e"), expect(&[(Number, "1"), (Identifier, "e")]));
    assert_eq!(scan("1e "), expect(&[(Number, "1"), (Identifier, "e")]));
}

#[test]
fn e_followed_by_letters_is_identifier() {
    assert_eq!(scan("1efoo"), expect(&[(Number, "1"), (Identifier, "efoo")]));
    assert_eq!(scan("1eE2"), expect(&[(Number, "1"), (Identifier, "eE2")]));
    assert_eq!(scan("1e_"), expect(&[(Number, "1"), (Identifier, "e_")]));
}

#[test]
fn e_before_closing_bracket_or_operator_is_identifier() {
    assert_eq!(
        scan("(1e)"),
        expect(&[
            (LParen, "("),
            (Number, "1"),
            (Identifier, "e"),
            (RParen, ")"),
        ])
    );
    assert_eq!(
        scan("1e*2"),
        expect(&[
            (Number, "1"),
            (Identifier, "e"),
            (Multiply, "*"),
            (Number, "2"),
        ])
    );
    assert_eq!(
        scan("1e^2"),
        expect(&[(Number, "1"), (Identifier, "e"), (Power, "^"), (Number, "2")])
    );
}

#[test]
fn e_before_invalid_stays_exponent() {
    assert_eq!(
        scan("1e$"),
        expect(&[(Number, "1"), (Exponent, "e"), (Invalid, "$")])
    );
    assert_eq!(
        scan("2E#1"),
        expect(&[(Number, "2"), (Exponent, "E"), (Invalid, "#"), (Number, "1")])
    );
}

#[test]
fn e_outside_numbers_is_plain_identifier() {
    assert_eq!(scan("e"), expect(&[(Identifier, "e")]));
    assert_eq!(scan("e2"), expect(&[(Identifier, "e2")]));
    assert_eq!(scan("x e 2"), expect(&[(Identifier, "x"), (Identifier, "e"), (Number, "2")]));
}

// === Power ===

#[test]
fn double_star_is_power() {
    assert_eq!(scan("**"), expect(&[(Power, "**")]));
    assert_eq!(
        scan("2**3"),
        expect(&[(Number, "2"), (Power, "**"), (Number, "3")])
    );
}

#[test]
fn triple_star_is_power_then_multiply() {
    assert_eq!(scan("***"), expect(&[(Power, "**"), (Multiply, "*")]));
    assert_eq!(scan("****"), expect(&[(Power, "**"), (Power, "**")]));
}

#[test]
fn separated_stars_are_multiplies() {
    assert_eq!(scan("* *"), expect(&[(Multiply, "*"), (Multiply, "*")]));
}

// === Brackets ===

#[test]
fn grouping_tokens() {
    assert_eq!(
        scan("({[x]})"),
        expect(&[
            (LParen, "("),
            (LBrace, "{"),
            (LBracket, "["),
            (Identifier, "x"),
            (RBracket, "]"),
            (RBrace, "}"),
            (RParen, ")"),
        ])
    );
}

// === Invalid Characters ===

#[test]
fn invalid_between_numbers() {
    assert_eq!(
        scan("1$2"),
        expect(&[(Number, "1"), (Invalid, "$"), (Number, "2")])
    );
}

#[test]
fn invalid_cuts_pending_lexeme_with_its_kind() {
    assert_eq!(scan("abc#"), expect(&[(Identifier, "abc"), (Invalid, "#")]));
    assert_eq!(scan("*!"), expect(&[(Multiply, "*"), (Invalid, "!")]));
    assert_eq!(scan("1.5,"), expect(&[(Number, "1.5"), (Invalid, ",")]));
}

#[test]
fn each_invalid_byte_is_its_own_token() {
    assert_eq!(
        scan("$$ @"),
        expect(&[(Invalid, "$"), (Invalid, "$"), (Invalid, "@")])
    );
}

#[test]
fn non_ascii_bytes_are_invalid() {
    let stream = lex(&[b'1', 0xC3, 0xA9]).expect("short scan");
    let kinds: Vec<_> = stream.kinds().collect();
    assert_eq!(kinds, vec![Number, Invalid, Invalid, EndOfInput]);
    assert_eq!(stream.get(1).and_then(|t| t.lexeme), Some(&[0xC3u8][..]));
}

// === Scanner API ===

#[test]
fn state_tracks_pending_lexeme() {
    let mut scanner = Scanner::new().expect("default buffers allocate");
    assert_eq!(scanner.state(), State::Start);
    scanner.feed(b'1').expect("feed");
    assert_eq!(scanner.state(), State::Number);
    scanner.feed(b'e').expect("feed");
    assert_eq!(scanner.state(), State::Exponent);
    assert_eq!(scanner.token_count(), 1);
    scanner.feed(b'x').expect("feed");
    assert_eq!(scanner.state(), State::Identifier);
    scanner.feed(b' ').expect("feed");
    assert_eq!(scanner.state(), State::Start);
    assert_eq!(scanner.token_count(), 2);
}

#[test]
fn default_config_matches_initial_capacities() {
    assert_eq!(
        ScannerConfig::default(),
        ScannerConfig {
            token_capacity: 25,
            pool_capacity: 150,
        }
    );
}

#[test]
fn lexemes_survive_pool_relocation() {
    // Zero-capacity buffers force a relocation on the first byte and
    // after every power of two.
    let config = ScannerConfig {
        token_capacity: 0,
        pool_capacity: 0,
    };
    let source: String = (0..200).map(|i| format!("v{i} + ")).collect();
    let mut input = source.as_bytes();

    let mut scanner = Scanner::with_config(config).expect("empty buffers allocate");
    scanner.scan(&mut input).expect("scan");
    let stream = scanner.finish().expect("finish");

    assert_eq!(stream.len(), 401);
    for (i, pair) in stream.iter().collect::<Vec<_>>().chunks(2).enumerate().take(200) {
        assert_eq!(pair[0].kind, Identifier);
        assert_eq!(pair[0].text(), Some(format!("v{i}").as_str()));
        assert_eq!(pair[1].kind, Plus);
        assert_eq!(pair[1].text(), Some("+"));
    }
}

#[test]
fn scan_from_chunked_source() {
    let mut source = ChunkedSource::new();
    for fragment in ["1", "2", "e", "-", "", "3"] {
        source.add(fragment).expect("fragment list grows");
    }
    let mut scanner = Scanner::new().expect("default buffers allocate");
    scanner.scan(&mut source).expect("scan");
    let stream = scanner.finish().expect("finish");
    assert_eq!(
        pairs(&stream),
        expect(&[(Number, "12"), (Exponent, "e"), (Minus, "-"), (Number, "3")])
    );
    assert_eq!(source.live_fragments(), 0);
}

#[test]
fn lex_chunks_joins_fragments() {
    let stream = lex_chunks(["fo", "o1", "23 ", "*", "*", "2"]).expect("short scan");
    assert_eq!(
        pairs(&stream),
        expect(&[(Identifier, "foo123"), (Power, "**"), (Number, "2")])
    );
}

#[test]
fn lex_chunks_of_nothing() {
    let stream = lex_chunks(Vec::<String>::new()).expect("short scan");
    assert_eq!(pairs(&stream), expect(&[]));
}

// === Transition Table ===

#[test]
fn table_is_total_and_well_formed() {
    for state in State::ALL {
        for class in CharClass::ALL {
            match transition(state, class) {
                Action::Skip | Action::Reject => assert_eq!(
                    state,
                    State::Start,
                    "{state:?} x {class:?}: Skip/Reject only from Start"
                ),
                Action::Extend(next) | Action::CutAndBegin(_, next) => assert_ne!(
                    next,
                    State::Start,
                    "{state:?} x {class:?}: extending into Start"
                ),
                Action::Cut(kind) => assert_ne!(
                    state,
                    State::Start,
                    "{state:?} x {class:?}: Start has nothing to cut ({kind:?})"
                ),
            }
        }
    }
}

#[test]
fn start_never_cuts() {
    for class in CharClass::ALL {
        assert!(!matches!(
            transition(State::Start, class),
            Action::Cut(_) | Action::CutAndBegin(..)
        ));
    }
}

#[test]
fn space_returns_every_state_to_start() {
    for state in State::ALL {
        let action = transition(state, CharClass::Space);
        match state {
            State::Start => assert_eq!(action, Action::Skip),
            _ => assert!(matches!(action, Action::Cut(_)), "{state:?}: {action:?}"),
        }
    }
}

#[test]
fn exponent_demoted_only_before_terminators() {
    for class in CharClass::ALL {
        if transition(State::Exponent, class) == Action::Cut(Identifier) {
            assert!(
                matches!(
                    class,
                    CharClass::Space
                        | CharClass::Close(_)
                        | CharClass::Op(
                            Operator::Star | Operator::Slash | Operator::Percent | Operator::Caret
                        )
                ),
                "{class:?} demoted an exponent to an identifier"
            );
        }
    }
    assert_eq!(
        transition(State::Exponent, CharClass::Other),
        Action::Cut(Exponent)
    );
}

// === Property Tests ===

mod proptest_scanner {
    use super::super::{lex, lex_chunks};
    use crate::TokenKind;
    use proptest::prelude::*;

    /// Bytes biased toward the grammar, with some invalid ones mixed in.
    fn expression_bytes() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![
                4 => proptest::sample::select(b"0123456789".to_vec()),
                3 => proptest::sample::select(b"abeEx_".to_vec()),
                3 => proptest::sample::select(b"+-*/%^.()[]{}".to_vec()),
                2 => Just(b' '),
                1 => proptest::sample::select(b"$#@!\t".to_vec()),
                1 => 1u8..=255,
            ],
            0..64,
        )
    }

    proptest! {
        #[test]
        fn end_marker_is_last_and_unique(input in expression_bytes()) {
            let stream = lex(&input).expect("short scan");
            let last = stream.get(stream.len() - 1).expect("stream is never empty");
            prop_assert_eq!(last.kind, TokenKind::EndOfInput);
            prop_assert_eq!(last.lexeme, None);
            for token in stream.iter().take(stream.len() - 1) {
                prop_assert_ne!(token.kind, TokenKind::EndOfInput);
                let lexeme = token.lexeme.expect("non-final tokens carry a lexeme");
                prop_assert!(!lexeme.is_empty());
            }
        }

        #[test]
        fn lexemes_cover_all_non_space_input(input in expression_bytes()) {
            let stream = lex(&input).expect("short scan");
            let lexed: Vec<u8> = stream.iter().filter_map(|t| t.lexeme).flatten().copied().collect();
            let expected: Vec<u8> = input
                .iter()
                .copied()
                .filter(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
                .collect();
            prop_assert_eq!(lexed, expected);
        }

        #[test]
        fn relexing_joined_lexemes_keeps_kinds(input in expression_bytes()) {
            let stream = lex(&input).expect("short scan");
            let joined = stream
                .iter()
                .filter_map(|t| t.lexeme)
                .collect::<Vec<_>>()
                .join(&b' ');
            let relexed = lex(&joined).expect("short scan");

            // Standing alone, an exponent marker is an ordinary identifier.
            let expected: Vec<TokenKind> = stream
                .kinds()
                .map(|k| if k == TokenKind::Exponent { TokenKind::Identifier } else { k })
                .collect();
            prop_assert_eq!(relexed.kinds().collect::<Vec<_>>(), expected);
        }

        #[test]
        fn fragment_boundaries_are_invisible(
            input in expression_bytes(),
            cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..8),
        ) {
            let whole = lex(&input).expect("short scan");

            let mut points: Vec<usize> = cuts.iter().map(|c| c.index(input.len() + 1)).collect();
            points.sort_unstable();
            let mut fragments = Vec::new();
            let mut from = 0;
            for point in points {
                fragments.push(input[from..point].to_vec());
                from = point;
            }
            fragments.push(input[from..].to_vec());

            let chunked = lex_chunks(fragments).expect("short scan");
            prop_assert_eq!(
                whole.iter().collect::<Vec<_>>(),
                chunked.iter().collect::<Vec<_>>()
            );
        }
    }
}
