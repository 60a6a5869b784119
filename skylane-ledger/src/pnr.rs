use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of a booking reference: the local date as `YYMMDD` followed by
/// a pseudo-random suffix clipped to the remaining width.
pub const PNR_LEN: usize = 9;

/// Produces booking references. Seeded once per process from the wall
/// clock; same-day collisions are possible and deliberately not re-checked
/// against the ledger.
#[derive(Debug)]
pub struct PnrGenerator {
    rng: StdRng,
}

impl PnrGenerator {
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Self::with_seed(seed)
    }

    /// Fixed-seed generator for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> String {
        let date = Local::now().format("%y%m%d");
        let suffix: u32 = self.rng.gen_range(0..10_000);
        let mut pnr = format!("{date}{suffix:04}");
        pnr.truncate(PNR_LEN);
        pnr
    }
}

impl Default for PnrGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pnr_is_date_prefixed_and_nine_chars() {
        let mut generator = PnrGenerator::with_seed(7);
        let pnr = generator.generate();
        assert_eq!(pnr.len(), PNR_LEN);
        assert!(pnr.starts_with(&Local::now().format("%y%m%d").to_string()));
        assert!(pnr.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_same_seed_yields_same_sequence() {
        let mut left = PnrGenerator::with_seed(99);
        let mut right = PnrGenerator::with_seed(99);
        for _ in 0..5 {
            assert_eq!(left.generate(), right.generate());
        }
    }
}
