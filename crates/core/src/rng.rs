//! RNG module - piece sources
//!
//! The engine only needs "give me the next piece kind". [`UniformSource`] draws
//! uniformly over the seven kinds from a small deterministic LCG, so the same
//! seed replays the same game. [`ScriptedSource`] cycles a fixed list and is
//! what tests and demos use to pin the piece order.

use std::fmt::Debug;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    ///
    /// Uses the high half of the state; the low bits of a power-of-two LCG
    /// cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }
}

/// Supplier of new piece kinds.
pub trait PieceSource: Debug + Send {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random draw over the 7-kind catalog
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Repeats a fixed sequence of kinds forever
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedSource {
    /// An empty script falls back to `I` pieces.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            kinds: kinds.into(),
            index: 0,
        }
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.kinds.is_empty() {
            return PieceKind::I;
        }
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = self.index.wrapping_add(1);
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_uniform_source_draws_every_kind() {
        let mut source = UniformSource::new(7);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let kind = source.next_kind();
            counts[(kind.color_index() - 1) as usize] += 1;
        }
        // Loose bounds: each kind near 1000 draws.
        assert!(counts.iter().all(|&c| (700..1300).contains(&c)), "{:?}", counts);
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut source = ScriptedSource::new([PieceKind::I, PieceKind::O]);
        assert_eq!(source.next_kind(), PieceKind::I);
        assert_eq!(source.next_kind(), PieceKind::O);
        assert_eq!(source.next_kind(), PieceKind::I);
    }

    #[test]
    fn test_empty_script_falls_back_to_i() {
        let mut source = ScriptedSource::new(Vec::new());
        assert_eq!(source.next_kind(), PieceKind::I);
    }
}
