use cachefront::policy::RecencyCache;
use cachefront::traits::CachePolicy;

fn main() {
    let mut cache: RecencyCache<&str, String> = RecencyCache::new(2);

    cache.put("a", "alpha".to_string());
    cache.put("b", "beta".to_string());

    cache.get(&"a");
    let evicted = cache.put("c", "gamma".to_string());

    println!("evicted: {:?}", evicted.map(|(key, _)| key));
    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
}

// Expected output:
// evicted: Some("b")
// contains a? true
// contains b? false
//
// Explanation: capacity=2; reading "a" makes "b" the least recently used entry.
