use pkmn_core::protocol::{self, Slots};
use pkmn_core::{
    BattleBuffer, BattleState, Choice, EngineResult, Generation, LayoutError, Outcome, Player,
    Pokemon, Seed, Status, decode, encode,
};
use pkmn_engine::{BattleEngine, EngineBridge};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info, trace, warn};

use crate::{ChoicePolicy, DriverConfig, DriverError, TraceEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Initialized,
    AwaitingChoices,
    Advancing,
    Terminal,
}

/// Drives one battle: one buffer, one engine, one RNG stream (in the buffer).
pub struct BattleDriver<E> {
    bridge: EngineBridge<E>,
    buffer: BattleBuffer,
    config: DriverConfig,
    phase: Phase,
    last: EngineResult,
    outcome: Outcome,
    state: BattleState,
    steps: u64,
    trace: Vec<TraceEntry>,
}

impl<E: BattleEngine> BattleDriver<E> {
    /// Encode `state` into a fresh buffer for `engine`'s generation.
    pub fn new(engine: E, state: BattleState, config: DriverConfig) -> Result<Self, DriverError> {
        let buffer = encode(&state, engine.generation())?;
        Ok(Self {
            bridge: EngineBridge::new(engine),
            buffer,
            config,
            phase: Phase::Initialized,
            last: EngineResult::default(),
            outcome: Outcome::Ongoing,
            state,
            steps: 0,
            trace: Vec::new(),
        })
    }

    /// Two teams in party order, RNG seeded from `seed`.
    pub fn from_teams(
        engine: E,
        p1: Vec<Pokemon>,
        p2: Vec<Pokemon>,
        seed: impl Into<Seed>,
        config: DriverConfig,
    ) -> Result<Self, DriverError> {
        Self::new(engine, BattleState::new(p1, p2, seed.into()), config)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn generation(&self) -> Generation {
        self.buffer.generation()
    }

    /// State decoded after the latest step.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn buffer(&self) -> &BattleBuffer {
        &self.buffer
    }

    /// Result of the latest step; holds the pending requests.
    pub fn last_result(&self) -> EngineResult {
        self.last
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn take_trace(&mut self) -> Vec<TraceEntry> {
        std::mem::take(&mut self.trace)
    }

    pub fn hp(&self, player: Player, slot: usize) -> Result<u16, DriverError> {
        Ok(self.buffer.hp(player, slot)?)
    }

    pub fn status(&self, player: Player, slot: usize) -> Result<Status, DriverError> {
        Ok(self.buffer.status(player, slot)?)
    }

    pub fn pp(&self, player: Player, slot: usize, index: usize) -> Result<u8, DriverError> {
        Ok(self.buffer.pp(player, slot, index)?)
    }

    pub fn set_hp(&mut self, player: Player, slot: usize, hp: u16) -> Result<(), DriverError> {
        self.edit(|buf| buf.set_hp(player, slot, hp))
    }

    pub fn set_status(
        &mut self,
        player: Player,
        slot: usize,
        status: Status,
    ) -> Result<(), DriverError> {
        self.edit(|buf| buf.set_status(player, slot, status))
    }

    pub fn set_pp(
        &mut self,
        player: Player,
        slot: usize,
        index: usize,
        pp: u8,
    ) -> Result<(), DriverError> {
        self.edit(|buf| buf.set_pp(player, slot, index, pp))
    }

    /// Poke the buffer between steps, then re-decode. Rejected once terminal.
    fn edit<F>(&mut self, f: F) -> Result<(), DriverError>
    where
        F: FnOnce(&mut BattleBuffer) -> Result<(), LayoutError>,
    {
        if matches!(self.phase, Phase::Terminal | Phase::Advancing) {
            return Err(DriverError::NotAwaitingChoices { phase: self.phase });
        }
        let mut scratch = self.buffer.clone();
        f(&mut scratch)?;
        self.state = decode(scratch.as_bytes(), scratch.generation())?;
        self.buffer = scratch;
        Ok(())
    }

    /// Opening step: both sides pass and the engine sends out the leads.
    pub fn start(&mut self) -> Result<Outcome, DriverError> {
        if self.phase != Phase::Initialized {
            return Err(DriverError::AlreadyStarted);
        }
        self.step(Choice::PASS, Choice::PASS)
    }

    /// Submit one choice per side and advance one step.
    pub fn submit(&mut self, p1: Choice, p2: Choice) -> Result<Outcome, DriverError> {
        self.expect_choices()?;
        self.step(p1, p2)
    }

    /// Legal options for `player`'s pending request.
    pub fn choices(&mut self, player: Player) -> Result<Vec<Choice>, DriverError> {
        self.expect_choices()?;
        let request = self.last.request(player);
        match self.bridge.choices(self.buffer.as_mut_bytes(), player, request) {
            Ok(choices) => Ok(choices),
            Err(err) => Err(self.fail(err.into())),
        }
    }

    /// Start if needed, then let the policies play until the battle ends or
    /// `max_turns` turns were played. Hitting the limit leaves the driver
    /// awaiting choices with an ongoing outcome.
    pub fn run<P1, P2>(&mut self, mut p1: P1, mut p2: P2) -> Result<Outcome, DriverError>
    where
        P1: ChoicePolicy,
        P2: ChoicePolicy,
    {
        if self.phase == Phase::Initialized {
            self.start()?;
        }
        while self.phase == Phase::AwaitingChoices {
            if self.state.turn > self.config.max_turns {
                info!(
                    turn = self.state.turn,
                    max_turns = self.config.max_turns,
                    "turn limit reached"
                );
                break;
            }
            let options = self.choices(Player::P1)?;
            let c1 = p1.choose(Player::P1, &self.state, &options);
            let options = self.choices(Player::P2)?;
            let c2 = p2.choose(Player::P2, &self.state, &options);
            self.submit(c1, c2)?;
        }
        Ok(self.outcome)
    }

    fn expect_choices(&self) -> Result<(), DriverError> {
        if self.phase != Phase::AwaitingChoices {
            return Err(DriverError::NotAwaitingChoices { phase: self.phase });
        }
        Ok(())
    }

    fn step(&mut self, p1: Choice, p2: Choice) -> Result<Outcome, DriverError> {
        self.phase = Phase::Advancing;

        let mut log = if self.config.protocol_log {
            vec![0; self.buffer.generation().logs_len()]
        } else {
            Vec::new()
        };
        let advanced = if self.config.protocol_log {
            self.bridge
                .advance_logged(self.buffer.as_mut_bytes(), p1, p2, &mut log)
        } else {
            self.bridge.advance(self.buffer.as_mut_bytes(), p1, p2)
        };
        let result = match advanced {
            Ok(result) => result,
            Err(err) => return Err(self.fail(err.into())),
        };
        let state = match decode(self.buffer.as_bytes(), self.buffer.generation()) {
            Ok(state) => state,
            Err(err) => return Err(self.fail(err.into())),
        };
        let messages = match protocol::parse(&log, &Slots::from_state(&self.state)) {
            Ok(messages) => messages,
            Err(err) => return Err(self.fail(err.into())),
        };

        self.steps += 1;
        self.last = result;
        self.outcome = result.outcome();
        debug!(
            step = self.steps,
            turn = state.turn,
            %p1,
            %p2,
            outcome = %self.outcome,
            "battle step"
        );
        for message in &messages {
            trace!(step = self.steps, "{message}");
        }
        if self.config.record_trace {
            self.trace.push(TraceEntry {
                step: self.steps,
                p1,
                p2,
                result,
                outcome: self.outcome,
                state: state.clone(),
                messages,
            });
        }
        self.state = state;
        self.phase = if result.is_terminal() {
            Phase::Terminal
        } else {
            Phase::AwaitingChoices
        };
        Ok(self.outcome)
    }

    fn fail(&mut self, err: DriverError) -> DriverError {
        warn!(step = self.steps, error = %err, "battle terminated with an error");
        self.phase = Phase::Terminal;
        self.outcome = Outcome::Error;
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkmn_core::{CodecError, PokemonType, Stats, Types};
    use pkmn_engine::StubEngine;

    fn mon(hp: u16, atk: u16, spe: u16) -> Pokemon {
        Pokemon::new(
            6,
            50,
            Stats::new(hp, atk, 60, spe, 60),
            Types::dual(PokemonType::Fire, PokemonType::Flying),
        )
        .with_move(52, 25)
    }

    fn driver(p1: Vec<Pokemon>, p2: Vec<Pokemon>) -> BattleDriver<StubEngine> {
        BattleDriver::from_teams(StubEngine::new(), p1, p2, 11u64, DriverConfig::default()).unwrap()
    }

    #[test]
    fn test_out_of_order_transitions_are_rejected() {
        let mut d = driver(vec![mon(100, 40, 50)], vec![mon(100, 40, 40)]);
        assert_eq!(d.phase(), Phase::Initialized);
        assert_eq!(
            d.submit(Choice::PASS, Choice::PASS),
            Err(DriverError::NotAwaitingChoices {
                phase: Phase::Initialized
            })
        );
        assert!(d.choices(Player::P1).is_err());

        d.start().unwrap();
        assert_eq!(d.phase(), Phase::AwaitingChoices);
        assert_eq!(d.start(), Err(DriverError::AlreadyStarted));
    }

    #[test]
    fn test_accessors_follow_the_buffer() {
        let mut d = driver(vec![mon(100, 40, 50)], vec![mon(100, 40, 40)]);
        d.start().unwrap();
        let mv = Choice::use_move(1).unwrap();
        d.submit(mv, mv).unwrap();

        assert_eq!(d.hp(Player::P1, 0).unwrap(), d.state().sides[0].team[0].hp);
        assert_eq!(d.pp(Player::P2, 0, 0).unwrap(), 39);
        assert_eq!(d.status(Player::P1, 0).unwrap(), Status::HEALTHY);
        assert_eq!(d.steps(), 2);

        let out_of_range = |err| {
            matches!(
                err,
                DriverError::Codec(CodecError::Layout(LayoutError::SlotOutOfRange { .. }))
            )
        };
        assert!(out_of_range(d.hp(Player::P1, 6).unwrap_err()));
        assert!(out_of_range(d.pp(Player::P1, 0, 4).unwrap_err()));
        assert!(out_of_range(d.status(Player::P2, 6).unwrap_err()));
    }

    #[test]
    fn test_edits_redecode_state() {
        let mut d = driver(vec![mon(100, 40, 50)], vec![mon(100, 40, 40)]);
        d.set_status(Player::P2, 0, Status::BURNED).unwrap();
        assert_eq!(d.state().sides[1].team[0].status, Status::BURNED);
        assert!(d.set_hp(Player::P1, 6, 1).is_err());
        assert_eq!(d.phase(), Phase::Initialized);
    }
}
