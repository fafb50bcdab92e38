//! Pokémon Showdown PSRNG - Rust port
//!
//! The generator libpkmn uses in its Showdown-compatible builds: a 64-bit LCG
//! whose output is the upper half of each new state. Every value is a pure
//! function of `(seed, index)`, so any position can be computed directly with
//! [`value_at`] and generators never share state.

use serde::{Deserialize, Serialize};

mod seed;

pub use seed::{Seed, SeedError};

/// LCG multiplier.
pub const MULTIPLIER: u64 = 0x5D58_8B65_6C07_8965;
/// LCG increment.
pub const INCREMENT: u64 = 0x0026_9EC3;

/// Apply the LCG step `steps` times to `state` in O(log steps).
pub fn jump(state: u64, mut steps: u64) -> u64 {
    let (mut acc_mul, mut acc_add) = (1u64, 0u64);
    let (mut cur_mul, mut cur_add) = (MULTIPLIER, INCREMENT);
    while steps > 0 {
        if steps & 1 == 1 {
            acc_mul = acc_mul.wrapping_mul(cur_mul);
            acc_add = acc_add.wrapping_mul(cur_mul).wrapping_add(cur_add);
        }
        cur_add = cur_mul.wrapping_add(1).wrapping_mul(cur_add);
        cur_mul = cur_mul.wrapping_mul(cur_mul);
        steps >>= 1;
    }
    acc_mul.wrapping_mul(state).wrapping_add(acc_add)
}

/// The value the reference generator seeded with `seed` returns on call
/// number `index` (0-based).
pub fn value_at(seed: u64, index: u64) -> u32 {
    output(jump(seed, index.wrapping_add(1)))
}

#[inline]
fn step(state: u64) -> u64 {
    MULTIPLIER.wrapping_mul(state).wrapping_add(INCREMENT)
}

#[inline]
fn output(state: u64) -> u32 {
    (state >> 32) as u32
}

/// An RNG call trace entry for debugging divergences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    /// Helper name ("next", "range", "chance")
    pub func: &'static str,
    /// Argument (span for range, denominator for chance)
    pub arg: u64,
    /// Value handed back to the caller
    pub result: u64,
    /// Raw 32-bit output consumed
    pub raw: u32,
}

/// Showdown PSRNG context
#[derive(Clone, Serialize, Deserialize)]
pub struct Psrng {
    seed: u64,
    state: u64,
    /// Total number of values drawn
    call_count: u64,
    #[serde(skip)]
    tracing: bool,
    #[serde(skip)]
    trace: Vec<RngTraceEntry>,
}

impl core::fmt::Debug for Psrng {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Psrng")
            .field("seed", &self.seed)
            .field("state", &format_args!("{:#018x}", self.state))
            .field("call_count", &self.call_count)
            .finish()
    }
}

impl PartialEq for Psrng {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.state == other.state && self.call_count == other.call_count
    }
}

impl Eq for Psrng {}

impl Psrng {
    /// Create a generator from an explicit seed.
    pub fn new(seed: impl Into<Seed>) -> Self {
        let seed = seed.into().get();
        Self {
            seed,
            state: seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Create a generator from an entropy-derived seed.
    pub fn from_entropy() -> Self {
        Self::new(Seed::from_entropy())
    }

    /// Rebuild a generator that has already produced `call_count` values.
    pub fn resume(seed: impl Into<Seed>, call_count: u64) -> Self {
        let mut rng = Self::new(seed);
        rng.state = jump(rng.seed, call_count);
        rng.call_count = call_count;
        rng
    }

    /// Continue from a raw checkpointed state, e.g. the `rng` field of a
    /// battle buffer. The continuation counts calls from zero again.
    pub fn from_state(state: u64) -> Self {
        Self::new(state)
    }

    pub fn seed(&self) -> Seed {
        Seed::new(self.seed)
    }

    /// Current internal LCG state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Total number of values drawn.
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    #[inline]
    fn advance(&mut self) -> u32 {
        self.state = step(self.state);
        self.call_count += 1;
        output(self.state)
    }

    fn record(&mut self, func: &'static str, arg: u64, result: u64, raw: u32) {
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count - 1,
                func,
                arg,
                result,
                raw,
            });
        }
    }

    /// Next raw 32-bit value.
    pub fn next(&mut self) -> u32 {
        let raw = self.advance();
        self.record("next", 0, raw as u64, raw);
        raw
    }

    /// Value in `[from, to)`, scaled like Showdown's `random(from, to)`.
    ///
    /// Returns `from` when the range is empty (still consuming one value).
    pub fn range(&mut self, from: u32, to: u32) -> u32 {
        let raw = self.advance();
        let span = to.saturating_sub(from) as u64;
        let result = from + ((raw as u64 * span) >> 32) as u32;
        self.record("range", span, result as u64, raw);
        result
    }

    /// True with probability `numerator / denominator`.
    pub fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        let raw = self.advance();
        let roll = ((raw as u64 * denominator as u64) >> 32) as u32;
        let hit = roll < numerator;
        self.record("chance", denominator as u64, hit as u64, raw);
        hit
    }

    /// Index in `0..len`. Returns `None` for `len == 0` without drawing.
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        Some(self.range(0, len) as usize)
    }

    /// Choose a random element from a slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.pick(items.len()).and_then(|index| items.get(index))
    }

    /// Enable RNG tracing
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
        tracing::trace!(seed = self.seed, calls = self.call_count, "psrng call tracing on");
    }

    /// Disable RNG tracing
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Get current RNG trace
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }

    /// Drain the recorded trace.
    pub fn take_trace(&mut self) -> Vec<RngTraceEntry> {
        std::mem::take(&mut self.trace)
    }
}

impl Default for Psrng {
    fn default() -> Self {
        Self::new(0u64)
    }
}
