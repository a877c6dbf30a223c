//! Deterministic random number generation.
//!
//! Rolls are derived from a stateless [`RngOracle`] keyed by a seed. The
//! [`Dice`] stream turns one seed per decision segment into an ordered
//! sequence of draws, so a round replays identically from the same game seed.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same values given the same seed.
pub trait RngOracle {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed from game state components.
///
/// * `game_seed` - base seed fixed at game start
/// * `round` - round counter
/// * `actor_id` - entity whose segment is being resolved
/// * `context` - distinguishes independent streams inside one segment
pub fn compute_seed(game_seed: u64, round: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= round.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Ordered stream of rolls drawn from an oracle.
///
/// Every draw advances an internal counter that is folded into the seed, so
/// two draws in the same segment are independent while the whole sequence
/// stays reproducible.
pub struct Dice<'a> {
    oracle: &'a dyn RngOracle,
    seed: u64,
    draws: u32,
}

impl<'a> Dice<'a> {
    pub fn new(oracle: &'a dyn RngOracle, seed: u64) -> Self {
        Self {
            oracle,
            seed,
            draws: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.seed, 0, 0, self.draws);
        self.draws = self.draws.wrapping_add(1);
        seed
    }

    /// 1..=100.
    pub fn d100(&mut self) -> u32 {
        let seed = self.next_seed();
        self.oracle.roll_d100(seed)
    }

    /// Inclusive range.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        let seed = self.next_seed();
        self.oracle.range(seed, min, max)
    }

    /// Succeeds when a d100 lands at or under `percent`.
    pub fn percent(&mut self, percent: u32) -> bool {
        self.d100() <= percent
    }

    /// Fair coin.
    pub fn coin(&mut self) -> bool {
        self.d100() <= 50
    }

    /// Uniform index into a collection of `len` elements.
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            _ => Some(self.range(0, (len - 1) as u32) as usize),
        }
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }
}
