//! How a side picks among the engine's legal choices.

use pkmn_core::{BattleState, Choice, Player};
use pkmn_rng::{Psrng, Seed};

/// Picks one of `options`, which the driver guarantees is non-empty.
pub trait ChoicePolicy {
    fn choose(&mut self, player: Player, state: &BattleState, options: &[Choice]) -> Choice;
}

impl<P: ChoicePolicy + ?Sized> ChoicePolicy for &mut P {
    fn choose(&mut self, player: Player, state: &BattleState, options: &[Choice]) -> Choice {
        (**self).choose(player, state, options)
    }
}

impl<P: ChoicePolicy + ?Sized> ChoicePolicy for Box<P> {
    fn choose(&mut self, player: Player, state: &BattleState, options: &[Choice]) -> Choice {
        (**self).choose(player, state, options)
    }
}

/// Always the first legal option.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl ChoicePolicy for FirstChoice {
    fn choose(&mut self, _player: Player, _state: &BattleState, options: &[Choice]) -> Choice {
        options.first().copied().unwrap_or(Choice::PASS)
    }
}

/// Uniform pick, driven by its own PSRNG so runs replay from the seed.
#[derive(Debug, Clone)]
pub struct RandomChoice {
    rng: Psrng,
}

impl RandomChoice {
    pub fn new(seed: impl Into<Seed>) -> Self {
        Self {
            rng: Psrng::new(seed),
        }
    }

    pub fn rng(&self) -> &Psrng {
        &self.rng
    }
}

impl ChoicePolicy for RandomChoice {
    fn choose(&mut self, _player: Player, _state: &BattleState, options: &[Choice]) -> Choice {
        self.rng.choose(options).copied().unwrap_or(Choice::PASS)
    }
}
