#![no_main]

use cachefront::policy::FrequencyCache;
use cachefront::traits::{CachePolicy, FrequencyPolicy};
use libfuzzer_sys::fuzz_target;

// Random operation sequences with a focus on removals, which are the path
// that can empty the minimum-frequency bucket outside of a bump.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16);
    let mut cache: FrequencyCache<u8, u8> = FrequencyCache::new(capacity);

    for chunk in ops.chunks_exact(2) {
        let (op, key) = (chunk[0] % 5, chunk[1]);
        match op {
            0 => {
                let before = cache.frequency(&key);
                if cache.get(&key).is_some() {
                    assert_eq!(cache.frequency(&key), before.map(|f| f.saturating_add(1)));
                }
            },
            1 => {
                let lowest = cache.min_frequency();
                let present = cache.contains(&key);
                if let Some((victim, _)) = cache.put(key, op) {
                    if capacity > 0 {
                        assert!(!present);
                        assert_ne!(victim, key);
                        assert!(lowest.is_some());
                    }
                }
            },
            2 => {
                cache.remove(&key);
            },
            3 => {
                if let Some((key, _)) = cache.peek_lfu() {
                    let key = *key;
                    assert_eq!(cache.frequency(&key), cache.min_frequency());
                }
            },
            _ => {
                let _ = cache.pop_lfu();
            },
        }
        assert!(cache.len() <= capacity);
        assert_eq!(cache.min_frequency().is_none(), cache.is_empty());
    }
    cache.check_invariants().unwrap();
});
