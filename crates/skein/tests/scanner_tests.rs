//! End-to-end scanner tests: typed reads, tokenization against ambiguous
//! delimiters, checkpoint round-trips, and the delimiter invariant.

use skein::{Regex, ScanState, Scanner};

#[test]
fn arithmetic_token_stream() {
    let mut scanner = Scanner::new("195 + (186 * 32) - 14 / 9");
    let plus = Regex::new(r"\+").unwrap();
    let minus = Regex::new(r"\-").unwrap();
    let open = Regex::new(r"\(").unwrap();
    let close = Regex::new(r"\)").unwrap();
    let slash = Regex::new("/").unwrap();

    assert_eq!(scanner.next_int().unwrap(), 195);
    assert_eq!(scanner.next(&plus).unwrap(), "+");
    assert_eq!(scanner.next(&open).unwrap(), "(");
    assert_eq!(scanner.next_int().unwrap(), 186);
    assert_eq!(scanner.next(&Regex::new(r"\*").unwrap()).unwrap(), "*");
    assert_eq!(scanner.next_int().unwrap(), 32);
    assert_eq!(scanner.next(&close).unwrap(), ")");
    assert_eq!(scanner.next(&minus).unwrap(), "-");
    assert_eq!(scanner.next_int().unwrap(), 14);
    assert_eq!(scanner.next(&slash).unwrap(), "/");
    assert_eq!(scanner.next_int().unwrap(), 9);
    assert!(scanner.at_eof());
}

#[test]
fn typed_readers_cover_their_domains() {
    let mut scanner = Scanner::new("-12 3.5 word x Q");
    assert_eq!(scanner.next_int().unwrap(), -12);
    assert!((scanner.next_double().unwrap() - 3.5).abs() < f64::EPSILON);
    assert_eq!(scanner.next_word().unwrap(), "word");
    assert_eq!(scanner.next_char().unwrap(), 'x');
    assert_eq!(scanner.next_letter().unwrap(), 'Q');
    assert!(scanner.at_eof());
}

#[test]
fn typed_reader_failures_do_not_consume() {
    let mut scanner = Scanner::new("abc");
    assert!(scanner.next_int().is_err());
    assert_eq!(scanner.next_word().unwrap(), "abc");
}

#[test]
fn delimiter_invariant_holds_after_every_operation() {
    let mut scanner = Scanner::new("  one   two\n\nthree  ");
    let check = |scanner: &Scanner<'_>| {
        if let Some(byte) = scanner.peek(0) {
            assert!(!byte.is_ascii_whitespace(), "delimiter byte left behind");
        }
    };
    check(&scanner);
    scanner.next_word().unwrap();
    check(&scanner);
    scanner.read().unwrap();
    check(&scanner);
    scanner.next_word().unwrap();
    check(&scanner);
    assert!(scanner.at_eof());
}

#[test]
fn checkpoint_roundtrip_restores_observable_state() {
    let mut scanner = Scanner::new("alpha beta\ngamma delta");
    scanner.next_word().unwrap();
    let before: ScanState = scanner.state();
    let handle = scanner.save_checkpoint();

    scanner.next_word().unwrap();
    scanner.next_word().unwrap();
    assert_ne!(scanner.state(), before);

    scanner.restore_to(handle);
    assert_eq!(scanner.state(), before);
    assert_eq!(scanner.next_word().unwrap(), "beta");
}

#[test]
fn checkpoints_restore_eof_bits() {
    let mut scanner = Scanner::new("only");
    let handle = scanner.save_checkpoint();
    scanner.next_word().unwrap();
    assert!(scanner.at_eof());
    assert!(scanner.state().at_eof);

    scanner.restore_to(handle);
    assert!(!scanner.at_eof());
    assert!(!scanner.state().at_eof);
    assert_eq!(scanner.next_word().unwrap(), "only");
}

#[test]
fn nested_checkpoints_pop_through_inner_frames() {
    let mut scanner = Scanner::new("a b c d e");
    let outer = scanner.save_checkpoint();
    scanner.next_word().unwrap();
    let inner = scanner.save_checkpoint();
    scanner.next_word().unwrap();
    let innermost = scanner.save_checkpoint();
    scanner.next_word().unwrap();

    // Restoring the middle handle discards the innermost frame too.
    scanner.restore_to(inner);
    assert_eq!(scanner.next_word().unwrap(), "b");

    // Stale handles are ignored.
    scanner.restore_to(innermost);
    assert_eq!(scanner.next_word().unwrap(), "c");

    scanner.restore_to(outer);
    assert_eq!(scanner.next_word().unwrap(), "a");
}

#[test]
fn line_and_column_replay_the_input() {
    let mut scanner = Scanner::new("ab cd\nef\n\n  gh");
    assert_eq!(scanner.next_word().unwrap(), "ab");
    // The delimiter after the token is consumed eagerly, so the live
    // column already sits on the next token.
    assert_eq!((scanner.state().line, scanner.state().column), (1, 4));
    assert_eq!(scanner.next_word().unwrap(), "cd");
    // The newline was consumed as delimiter content.
    assert_eq!((scanner.state().line, scanner.state().column), (2, 1));
    assert_eq!(scanner.next_word().unwrap(), "ef");
    assert_eq!((scanner.state().line, scanner.state().column), (4, 3));
    assert_eq!(scanner.next_word().unwrap(), "gh");
    assert!(scanner.at_eof());
}

#[test]
fn ambiguous_delimiter_trims_back_to_the_match() {
    // A token that begins like the pattern but ends with junk: the
    // scanner reads the whole chunk, then retracts byte by byte.
    let mut scanner = Scanner::new("42abc 7");
    assert_eq!(scanner.next_int().unwrap(), 42);
    assert_eq!(scanner.peek(0), Some(b'a'));
    assert_eq!(scanner.next_word().unwrap(), "abc");
    assert_eq!(scanner.next_int().unwrap(), 7);
}

#[test]
fn custom_delimiter() {
    let mut scanner = Scanner::with_delimiter("one,two,,three", ",+").unwrap();
    let word = Regex::new(r"\A+").unwrap();
    assert_eq!(scanner.next(&word).unwrap(), "one");
    assert_eq!(scanner.next(&word).unwrap(), "two");
    assert_eq!(scanner.next(&word).unwrap(), "three");
    assert!(scanner.at_eof());
}

#[test]
fn read_until_consumes_the_delimiter_inclusive() {
    let mut scanner = Scanner::new("key=value;rest");
    let chunk = scanner.read_until(b';');
    assert_eq!(chunk, "key=value;");
    assert_eq!(scanner.peek(0), Some(b'r'));

    // Without the delimiter anywhere, read to EOF.
    let mut scanner = Scanner::new("no-stop");
    assert_eq!(scanner.read_until(b';'), "no-stop");
    assert!(scanner.at_eof());
}

#[test]
fn read_line_and_eof_behavior() {
    let mut scanner = Scanner::new("first\nsecond");
    assert_eq!(scanner.read_line().unwrap(), "first");
    assert_eq!(scanner.read_line().unwrap(), "second");
    assert!(scanner.read_line().is_err());
}

#[test]
fn peek_is_non_consuming_and_bounded() {
    let scanner = Scanner::new("xy");
    assert_eq!(scanner.peek(0), Some(b'x'));
    assert_eq!(scanner.peek(1), Some(b'y'));
    assert_eq!(scanner.peek(2), None);
    assert_eq!(scanner.peek(0), Some(b'x'));
}

#[test]
fn scan_failure_carries_position() {
    let mut scanner = Scanner::new("line\n  !!!");
    scanner.next_word().unwrap();
    let err = scanner.next_word().unwrap_err();
    assert_eq!(err.state().line, 2);
    assert_eq!(err.state().column, 3);
}

#[test]
fn word_bounded_pattern_scans_only_at_boundaries() {
    let bounded = Regex::new(r"\b\d+\b").unwrap();
    let mut scanner = Scanner::new("12 34");
    assert_eq!(scanner.next(&bounded).unwrap(), "12");
    assert_eq!(scanner.next(&bounded).unwrap(), "34");

    // A back-bounded pattern refuses to stop mid-token.
    let mut scanner = Scanner::new("12ab");
    assert!(scanner.next(&bounded).is_err());
}
