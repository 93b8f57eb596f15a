use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use rand::seq::IndexedRandom;
use tokio::time::{interval, MissedTickBehavior};

use crate::generator::attack::{generate_login_attempt, random_token};
use crate::models::attack::{AttackAttempt, LoginAttempt};

/// Bounded live view over the initial attack dataset. Each tick re-samples
/// one record from the pool and replays it as a fresh event with a new id
/// and a current timestamp. The pool itself never changes; only the display
/// list does, and it is replaced wholesale under a short write lock.
pub struct ActivityFeed {
    pool: Vec<AttackAttempt>,
    capacity: usize,
    entries: RwLock<Vec<AttackAttempt>>,
}

impl ActivityFeed {
    /// Seed the feed with the first `capacity` records of the pool.
    pub fn new(pool: Vec<AttackAttempt>, capacity: usize) -> Self {
        let seed: Vec<AttackAttempt> = pool.iter().take(capacity).cloned().collect();
        Self {
            pool,
            capacity,
            entries: RwLock::new(seed),
        }
    }

    /// Replay one pooled record as a live event. No-op on an empty pool.
    pub fn tick(&self) {
        let mut rng = rand::rng();
        let Some(source) = self.pool.choose(&mut rng) else {
            return;
        };
        let mut replay = source.clone();
        replay.id = random_token(&mut rng);
        replay.timestamp = Utc::now();

        let mut entries = self.entries.write();
        entries.insert(0, replay);
        entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> Vec<AttackAttempt> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Run the replay loop forever.
    pub async fn run(&self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            self.tick();
        }
    }
}

/// Bounded live list of synthetic credential-stuffing attempts, newest
/// first. Independent of the attack feed; the two loops are uncoordinated.
pub struct LoginFeed {
    capacity: usize,
    entries: RwLock<Vec<LoginAttempt>>,
}

impl LoginFeed {
    /// Create a feed pre-populated with `seed` generated attempts.
    pub fn seeded(seed: usize, capacity: usize) -> Self {
        let initial: Vec<LoginAttempt> = (0..seed.min(capacity))
            .map(|_| generate_login_attempt())
            .collect();
        Self {
            capacity,
            entries: RwLock::new(initial),
        }
    }

    /// Generate one fresh attempt and prepend it.
    pub fn tick(&self) {
        self.record(generate_login_attempt());
    }

    /// Record an externally submitted attempt (the fake login portal).
    pub fn record(&self, attempt: LoginAttempt) {
        let mut entries = self.entries.write();
        entries.insert(0, attempt);
        entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> Vec<LoginAttempt> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Run the generation loop forever.
    pub async fn run(&self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::attack::generate_attacks;

    #[test]
    fn test_activity_feed_seeds_from_pool_prefix() {
        let pool = generate_attacks(50);
        let feed = ActivityFeed::new(pool.clone(), 20);
        let entries = feed.entries();
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].id, pool[0].id);
    }

    #[test]
    fn test_activity_feed_stays_bounded() {
        let feed = ActivityFeed::new(generate_attacks(50), 20);
        for _ in 0..100 {
            feed.tick();
        }
        assert_eq!(feed.len(), 20);
    }

    #[test]
    fn test_tick_prepends_restamped_replay() {
        let pool = generate_attacks(10);
        let feed = ActivityFeed::new(pool.clone(), 20);
        let before = Utc::now();
        feed.tick();

        let newest = &feed.entries()[0];
        assert!(newest.timestamp >= before);
        // Fresh identity, recycled contents.
        assert!(pool.iter().all(|a| a.id != newest.id));
        assert!(pool.iter().any(|a| a.ip == newest.ip));
    }

    #[test]
    fn test_activity_feed_empty_pool() {
        let feed = ActivityFeed::new(Vec::new(), 20);
        feed.tick();
        assert!(feed.is_empty());
    }

    #[test]
    fn test_login_feed_seed_and_bound() {
        let feed = LoginFeed::seeded(10, 20);
        assert_eq!(feed.len(), 10);
        for _ in 0..50 {
            feed.tick();
        }
        assert_eq!(feed.len(), 20);
    }

    #[test]
    fn test_login_feed_records_submitted_attempt() {
        let feed = LoginFeed::seeded(5, 20);
        let mut attempt = crate::generator::attack::generate_login_attempt();
        attempt.username = "operator".to_string();
        feed.record(attempt);
        assert_eq!(feed.entries()[0].username, "operator");
    }
}
