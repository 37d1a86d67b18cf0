use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::catalog::{BOT_RESPONSES, QUICK_REPLY_POOL};

/// Number of distinct replies drawn for a staggered answer
pub const RESPONSES_PER_TURN: usize = 2;

/// Number of quick-reply options revealed at once
pub const OPTIONS_PER_TURN: usize = 3;

/// Random selection over the canned text pools
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Uniformly pick one entry
    pub fn pick(&mut self, pool: &[&'static str]) -> Option<&'static str> {
        let choice = pool.choose(&mut self.rng).copied();
        trace!("picked {:?}", choice);
        choice
    }

    /// Shuffle a copy of the pool and keep the first `count` entries
    pub fn sample(&mut self, pool: &[&'static str], count: usize) -> Vec<&'static str> {
        let mut shuffled = pool.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled.truncate(count);
        trace!("sampled {} of {}", shuffled.len(), pool.len());
        shuffled
    }

    pub fn random_responses(&mut self) -> Vec<String> {
        self.sample(&BOT_RESPONSES, RESPONSES_PER_TURN)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn random_options(&mut self) -> Vec<String> {
        self.sample(&QUICK_REPLY_POOL, OPTIONS_PER_TURN)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn responses_are_distinct_and_from_the_pool() {
        let mut sampler = Sampler::new(Some(7));
        for _ in 0..50 {
            let responses = sampler.random_responses();
            assert_eq!(responses.len(), 2);
            assert_ne!(responses[0], responses[1]);
            assert!(responses.iter().all(|r| BOT_RESPONSES.contains(&r.as_str())));
        }
    }

    #[test]
    fn options_are_distinct_and_from_the_pool() {
        let mut sampler = Sampler::new(Some(11));
        for _ in 0..50 {
            let options = sampler.random_options();
            let unique: HashSet<_> = options.iter().collect();
            assert_eq!(options.len(), 3);
            assert_eq!(unique.len(), 3);
            assert!(options.iter().all(|o| QUICK_REPLY_POOL.contains(&o.as_str())));
        }
    }

    #[test]
    fn sample_count_is_clamped_to_pool_size() {
        let mut sampler = Sampler::new(Some(1));
        let all = sampler.sample(&["a", "b"], 5);
        assert_eq!(all.len(), 2);
        assert!(sampler.sample(&[], 3).is_empty());
        assert_eq!(sampler.pick(&[]), None);
    }

    #[test]
    fn same_seed_gives_same_draws() {
        let mut a = Sampler::new(Some(42));
        let mut b = Sampler::new(Some(42));
        assert_eq!(a.random_options(), b.random_options());
        assert_eq!(a.pick(&BOT_RESPONSES), b.pick(&BOT_RESPONSES));
    }

    #[test]
    fn every_pool_entry_eventually_leads() {
        let mut sampler = Sampler::new(Some(3));
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(sampler.sample(&BOT_RESPONSES, 1)[0]);
        }
        assert_eq!(seen.len(), BOT_RESPONSES.len());
    }
}
