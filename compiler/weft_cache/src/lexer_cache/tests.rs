use super::*;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
struct Token(String);

#[derive(Debug, PartialEq, Eq)]
struct Trivia(usize);

fn classify(text: &str) -> Option<u8> {
    (text == "return").then_some(1)
}

type Pools = LexerPools<Arc<Token>, Arc<Trivia>, u8>;

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn make_token(span: &[u16]) -> Arc<Token> {
    Arc::new(Token(String::from_utf16_lossy(span)))
}

#[test]
fn token_and_trivia_caches_are_independent() {
    let pools = Pools::new(CacheConfig::default(), classify);
    let mut cache = pools.allocate();
    let span = utf16("  ");

    let token = cache.lookup_token(&span, make_token);
    let trivia = cache.lookup_trivia(&span, |s| Arc::new(Trivia(s.len())));

    assert_eq!(*token, Token("  ".to_owned()));
    assert_eq!(*trivia, Trivia(2));
    assert_eq!(cache.token_count(), 1);
    assert_eq!(cache.trivia_count(), 1);
    cache.free();
}

#[test]
fn repeated_token_is_shared() {
    let pools = Pools::new(CacheConfig::default(), classify);
    let mut cache = pools.allocate();
    let source = utf16("return x; return y;");

    let first = cache.lookup_token(&source[0..6], make_token);
    let second = cache.lookup_token(&source[10..16], make_token);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.try_get_keyword_kind(&source[10..16]), Some(1));
    cache.free();
}

#[test]
fn free_clears_entries_for_next_session() {
    let pools = Pools::new(CacheConfig::default(), classify);
    let mut cache = pools.allocate();
    let first = cache.lookup_token(&utf16("id"), make_token);
    cache.free();
    assert_eq!(pools.available_token_caches(), 1);

    let mut cache = pools.allocate();
    assert_eq!(cache.token_count(), 0);
    let second = cache.lookup_token(&utf16("id"), make_token);
    assert!(!Arc::ptr_eq(&first, &second));
    cache.free();
}

#[test]
fn sessions_on_different_threads() {
    let pools = Pools::new(CacheConfig::default(), classify);
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut cache = pools.allocate();
                for word in ["return", "x", "return"] {
                    cache.lookup_token(&utf16(word), make_token);
                }
                assert_eq!(cache.token_count(), 2);
                cache.free();
            });
        }
    });
    assert!(pools.available_token_caches() >= 1);
}
