use pagematch::{InputCache, Value};

#[test]
fn cached_value_shadows_live_parameter() {
    let mut cache = InputCache::with_request_params([("name", "live")]);

    assert_eq!(cache.get("name"), Some(Value::from("live")));

    cache.set("name", " cached ");
    assert_eq!(cache.get("name"), Some(Value::from("cached")));
}

#[test]
fn filter_applies_to_live_but_never_to_cached() {
    let mut cache = InputCache::with_request_params([("q", " term ")]);
    let escape = |value: Value| match value {
        Value::Text(text) => Value::Text(text.replace('<', "&lt;")),
        list => list,
    };

    // live read: trimmed, then filtered
    assert_eq!(
        cache.get_filtered("q", escape),
        Some(Value::from("term"))
    );

    // once cached, the stored value is returned as-is
    cache.set("q", "<b>");
    assert_eq!(cache.get_filtered("q", escape), Some(Value::from("<b>")));
}

#[test]
fn query_ingestion_is_visible_through_the_same_cache() {
    let mut cache = InputCache::with_request_params([("page", "live-page")]);
    cache.ingest_query("page=from-query&extra=1");

    // ingestion writes through set(), so it shadows the live parameter
    assert_eq!(cache.get("page"), Some(Value::from("from-query")));
    assert_eq!(cache.get("extra"), Some(Value::from("1")));
    assert_eq!(cache.get_or("missing", "default"), Value::from("default"));
}

#[test]
fn fresh_cache_sees_nothing_from_an_old_one() {
    let mut old = InputCache::new();
    old.set("name", "John");

    // one cache per request: a new request gets a new cache
    let fresh = InputCache::new();
    assert_eq!(fresh.get("name"), None);
}
