use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// Fresh external identifier. The 128-bit space makes a storage-side
/// uniqueness check unnecessary.
pub fn new_external_id() -> Uuid {
    Uuid::new_v4()
}

static LAST_SLUG_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp that never repeats within this process. Two calls
/// in the same millisecond get consecutive values instead of colliding.
/// Shared by slug generation and stored-file naming.
pub fn unique_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_SLUG_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_SLUG_MILLIS.compare_exchange_weak(
            last,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}

/// URL-safe slug: normalized title plus a uniqueness-forcing timestamp
/// suffix, so identical titles still produce distinct slugs.
pub fn unique_slug(title: &str) -> String {
    format!("{}-{}", slug::slugify(title), unique_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn external_ids_are_distinct() {
        assert_ne!(new_external_id(), new_external_id());
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        let slug = unique_slug("My First Post");
        assert!(slug.starts_with("my-first-post-"));
    }

    #[test]
    fn slug_normalizes_punctuation_and_unicode() {
        let slug = unique_slug("Héllo,   World!!");
        assert!(slug.starts_with("hello-world-"));
        assert!(!slug.contains("--"));
    }

    #[test]
    fn identical_titles_in_same_millisecond_get_distinct_slugs() {
        let slugs: HashSet<String> = (0..100).map(|_| unique_slug("Same Title")).collect();
        assert_eq!(slugs.len(), 100);
    }

    #[test]
    fn slug_suffix_is_monotonic() {
        let first = unique_slug("a");
        let second = unique_slug("a");
        let suffix = |s: &str| s.rsplit('-').next().unwrap().parse::<i64>().unwrap();
        assert!(suffix(&second) > suffix(&first));
    }
}
