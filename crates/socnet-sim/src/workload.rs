//! Synthetic usernames, posts, and followee lists.
//!
//! Names are 10 random ASCII alphanumerics. With `reuse_percent == 0` every
//! followee and mention is a fresh name, so each month is a set of
//! disconnected stars around the active users. Raising it draws some
//! targets from names already generated, which produces shared neighbours
//! and cycles.

use crate::rng::DeterministicRng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const USERNAME_LEN: usize = 10;
pub const WORDS_PER_POST: (usize, usize) = (5, 15);
pub const POSTS_PER_USER: (usize, usize) = (1, 5);
pub const FOLLOWEES_PER_USER: (usize, usize) = (1, 5);
pub const MENTION_PERCENT: u8 = 10;

/// Generates activity from a seeded RNG.
#[derive(Debug, Clone)]
pub struct Workload {
    rng: DeterministicRng,
    reuse_percent: u8,
    known: Vec<String>,
}

impl Workload {
    #[must_use]
    pub const fn new(seed: u64, reuse_percent: u8) -> Self {
        Self {
            rng: DeterministicRng::new(seed),
            reuse_percent,
            known: Vec::new(),
        }
    }

    /// A fresh random username. It joins the pool that later targets may be
    /// drawn from.
    pub fn username(&mut self) -> String {
        let name = self.filler_word();
        self.known.push(name.clone());
        name
    }

    /// Target of a follow or mention: a known name with probability
    /// `reuse_percent`, otherwise a fresh one.
    fn target(&mut self) -> String {
        if self.rng.hit_rate_percent(self.reuse_percent) {
            if let Some(name) = self.rng.choose(&self.known) {
                return name.clone();
            }
        }
        self.username()
    }

    /// One post of random words; each word is an `@mention` with 10% odds.
    pub fn post(&mut self) -> String {
        let (lo, hi) = WORDS_PER_POST;
        let words = self.rng.next_in_range(lo, hi);
        let mut out: Vec<String> = Vec::with_capacity(words);
        for _ in 0..words {
            let word = if self.rng.hit_rate_percent(MENTION_PERCENT) {
                format!("@{}", self.target())
            } else {
                self.filler_word()
            };
            out.push(word);
        }
        out.join(" ")
    }

    pub fn posts(&mut self) -> Vec<String> {
        let (lo, hi) = POSTS_PER_USER;
        let count = self.rng.next_in_range(lo, hi);
        (0..count).map(|_| self.post()).collect()
    }

    pub fn followees(&mut self) -> Vec<String> {
        let (lo, hi) = FOLLOWEES_PER_USER;
        let count = self.rng.next_in_range(lo, hi);
        (0..count).map(|_| self.target()).collect()
    }

    /// Random alphanumeric word that does not enter the name pool.
    fn filler_word(&mut self) -> String {
        (0..USERNAME_LEN)
            .filter_map(|_| self.rng.choose(ALPHABET).map(|b| char::from(*b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socnet_core::extract_mentions;

    #[test]
    fn usernames_are_ten_alphanumerics() {
        let mut w = Workload::new(3, 0);
        for _ in 0..50 {
            let name = w.username();
            assert_eq!(name.len(), USERNAME_LEN);
            assert!(name.chars().all(|c| c.is_ascii_alphanumeric()), "{name}");
        }
    }

    #[test]
    fn post_word_counts_within_bounds() {
        let mut w = Workload::new(11, 0);
        for _ in 0..200 {
            let post = w.post();
            let words = post.split_whitespace().count();
            assert!((5..=15).contains(&words), "{words}: {post}");
        }
    }

    #[test]
    fn mentions_parse_back_out() {
        let mut w = Workload::new(5, 0);
        let mut total = 0;
        for _ in 0..200 {
            let post = w.post();
            let expected = post.split_whitespace().filter(|t| t.starts_with('@')).count();
            let mentions = extract_mentions(&post);
            assert_eq!(mentions.len(), expected, "{post}");
            assert!(mentions.iter().all(|m| m.len() == USERNAME_LEN));
            total += mentions.len();
        }
        // ~10% of ~2000 words.
        assert!(total > 50, "{total}");
    }

    #[test]
    fn list_sizes_within_bounds() {
        let mut w = Workload::new(9, 0);
        for _ in 0..100 {
            assert!((1..=5).contains(&w.followees().len()));
            assert!((1..=5).contains(&w.posts().len()));
        }
    }

    #[test]
    fn full_reuse_draws_known_names() {
        let mut w = Workload::new(1, 100);
        let seed_name = w.username();
        for name in w.followees() {
            assert_eq!(name, seed_name);
        }
    }

    #[test]
    fn deterministic_per_seed() {
        let mut a = Workload::new(77, 25);
        let mut b = Workload::new(77, 25);
        assert_eq!(a.username(), b.username());
        assert_eq!(a.posts(), b.posts());
        assert_eq!(a.followees(), b.followees());
    }
}
