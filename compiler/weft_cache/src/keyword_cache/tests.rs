use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kw {
    If,
    While,
    Async,
    Namespace,
}

fn classify(text: &str) -> Option<Kw> {
    match text {
        "if" => Some(Kw::If),
        "while" => Some(Kw::While),
        // contextual
        "async" => Some(Kw::Async),
        "namespace" => Some(Kw::Namespace),
        _ => None,
    }
}

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn classifies_keywords_and_identifiers() {
    let pool = KeywordKindPool::new(&CacheConfig::default(), classify);
    let mut cache = pool.allocate();

    assert_eq!(cache.try_get_keyword_kind(&utf16("if")), Some(Kw::If));
    assert_eq!(cache.try_get_keyword_kind(&utf16("async")), Some(Kw::Async));
    assert_eq!(cache.try_get_keyword_kind(&utf16("counter")), None);
}

#[test]
fn evaluates_once_per_distinct_key() {
    let pool = KeywordKindPool::new(&CacheConfig::default(), classify);
    let mut cache = pool.allocate();

    for _ in 0..5 {
        cache.try_get_keyword_kind(&utf16("while"));
        cache.try_get_keyword_kind(&utf16("value"));
    }
    assert_eq!(cache.evaluations(), 2);
}

#[test]
fn long_text_is_rejected_without_evaluation() {
    let pool = KeywordKindPool::new(&CacheConfig::default(), classify);
    let mut cache = pool.allocate();

    // 11 units: longer than the default cutoff of 10.
    assert_eq!(cache.try_get_keyword_kind(&utf16("abcdefghijk")), None);
    assert_eq!(cache.evaluations(), 0);

    // Exactly at the cutoff is still looked up.
    assert_eq!(cache.try_get_keyword_kind(&utf16("namespaces")), None);
    assert_eq!(cache.evaluations(), 1);
}

#[test]
fn cutoff_is_configurable() {
    let pool = KeywordKindPool::new(&CacheConfig::with_max_keyword_length(4), classify);
    let mut cache = pool.allocate();
    assert_eq!(cache.try_get_keyword_kind(&utf16("while")), None);
    assert_eq!(cache.try_get_keyword_kind(&utf16("if")), Some(Kw::If));
}

#[test]
fn memo_survives_return_to_pool() {
    let pool = KeywordKindPool::new(&CacheConfig::default(), classify);
    let mut cache = pool.allocate();
    cache.try_get_keyword_kind(&utf16("if"));
    pool.free(cache);

    let mut cache = pool.allocate();
    assert_eq!(cache.try_get_keyword_kind(&utf16("if")), Some(Kw::If));
    assert_eq!(cache.evaluations(), 1);
}

#[test]
fn invalid_utf16_is_not_a_keyword() {
    let mut factory = CachingFactory::new(&CacheConfig::default(), classify);
    assert_eq!(factory.get_or_make_value(&[0xDC00, u16::from(b'f')]), None);
}

#[test]
fn memo_stays_bounded_across_many_borrows() {
    let pool = KeywordKindPool::new(&CacheConfig::default(), classify);

    for round in 0..200u16 {
        let mut cache = pool.allocate();
        for i in 0..500u16 {
            assert_eq!(cache.try_get_keyword_kind(&[0x100 + round, 0x41 + i]), None);
        }
        assert!(cache.memo_len() <= 512);
        pool.free(cache);
    }

    let mut cache = pool.allocate();
    assert_eq!(cache.evaluations(), 200 * 500);
    assert_eq!(cache.memo_len(), 512);

    // Keys from the first round were overwritten and are classified again.
    for i in 0..500u16 {
        cache.try_get_keyword_kind(&[0x100, 0x41 + i]);
    }
    assert!(cache.evaluations() > 200 * 500);
    assert_eq!(cache.memo_len(), 512);
}

#[test]
fn colliding_keys_overwrite_one_slot() {
    let config = CacheConfig {
        keyword_memo_size: 1,
        ..Default::default()
    };
    let mut factory = CachingFactory::new(&config, classify);
    assert_eq!(factory.capacity(), 1);

    assert_eq!(factory.get_or_make_value(&utf16("if")), Some(Kw::If));
    assert_eq!(factory.get_or_make_value(&utf16("while")), Some(Kw::While));
    assert_eq!(factory.len(), 1);
    assert_eq!(factory.get_or_make_value(&utf16("if")), Some(Kw::If));
    assert_eq!(factory.evaluations(), 3);
}
