//! Driver scenarios against the stub engine and a few misbehaving engines.

use pkmn_core::{
    BattleState, Choice, ChoiceKind, Generation, Outcome, Player, Pokemon, PokemonType, Seed,
    Stats, Types, decode,
};
use pkmn_driver::{
    BattleDriver, DriverConfig, DriverError, FirstChoice, Phase, RandomChoice, trace,
};
use pkmn_engine::{BattleEngine, BridgeError, StubEngine};
use proptest::prelude::*;

fn mon(hp: u16, atk: u16, spe: u16) -> Pokemon {
    Pokemon::new(
        130,
        100,
        Stats::new(hp, atk, 200, spe, 200),
        Types::dual(PokemonType::Water, PokemonType::Flying),
    )
    .with_move(56, 5)
    .with_move(82, 10)
}

fn stub_driver(p1: Vec<Pokemon>, p2: Vec<Pokemon>, config: DriverConfig) -> BattleDriver<StubEngine> {
    BattleDriver::from_teams(StubEngine::new(), p1, p2, 35u64, config).unwrap()
}

/// Answers every update with `reply`, optionally scribbling on the buffer first.
struct Broken {
    reply: u8,
    corrupt: Option<(usize, u8)>,
}

impl BattleEngine for Broken {
    fn generation(&self) -> Generation {
        Generation::One
    }

    fn update(&mut self, buffer: &mut [u8], _c1: u8, _c2: u8) -> u8 {
        if let Some((offset, value)) = self.corrupt {
            buffer[offset] = value;
        }
        self.reply
    }

    fn choices(
        &mut self,
        _buffer: &mut [u8],
        _player: Player,
        _request: ChoiceKind,
        out: &mut [u8],
    ) -> usize {
        out[0] = Choice::PASS.to_byte();
        1
    }
}

fn broken_driver(reply: u8, corrupt: Option<(usize, u8)>) -> BattleDriver<Broken> {
    let state = BattleState::new(vec![mon(300, 50, 90)], vec![mon(300, 50, 80)], Seed::new(1));
    BattleDriver::new(Broken { reply, corrupt }, state, DriverConfig::default()).unwrap()
}

#[test]
fn test_defeated_side_ends_battle_on_the_same_step() {
    let mut d = stub_driver(
        vec![mon(300, 50, 90)],
        vec![mon(300, 50, 80), mon(300, 50, 80)],
        DriverConfig::default(),
    );
    d.set_hp(Player::P2, 0, 0).unwrap();
    d.set_hp(Player::P2, 1, 0).unwrap();

    assert_eq!(d.start().unwrap(), Outcome::P1Win);
    assert_eq!(d.phase(), Phase::Terminal);
    assert_eq!(d.trace().len(), 1);
    assert_eq!(d.trace()[0].outcome, Outcome::P1Win);
    assert!(matches!(
        d.submit(Choice::PASS, Choice::PASS),
        Err(DriverError::NotAwaitingChoices {
            phase: Phase::Terminal
        })
    ));
}

#[test]
fn test_defeat_after_start_is_a_win() {
    let mut d = stub_driver(vec![mon(300, 50, 90)], vec![mon(300, 50, 80)], DriverConfig::default());
    d.start().unwrap();
    d.set_hp(Player::P2, 0, 0).unwrap();

    let mv = Choice::use_move(1).unwrap();
    assert_eq!(d.submit(mv, mv), Ok(Outcome::P1Win));
    assert_eq!(d.phase(), Phase::Terminal);
    assert_eq!(d.trace().last().map(|e| e.outcome), Some(Outcome::P1Win));
    // nobody moved on the deciding step
    assert_eq!(d.hp(Player::P1, 0), Ok(300));
}

#[test]
fn test_protocol_log_lands_in_the_trace() {
    let config = DriverConfig {
        protocol_log: true,
        ..DriverConfig::default()
    };
    let mut d = stub_driver(vec![mon(300, 900, 90)], vec![mon(300, 60, 80)], config);
    assert_eq!(d.run(FirstChoice, FirstChoice).unwrap(), Outcome::P1Win);

    let trace = d.trace();
    assert_eq!(
        trace[0].messages,
        [
            "|switch|p1a: Gyarados|Gyarados|300/300",
            "|switch|p2a: Gyarados|Gyarados|300/300",
            "|turn|1",
        ]
    );
    let last = &trace.last().unwrap().messages;
    assert_eq!(last[0], "|move|p1a: Gyarados|Hydro Pump|p2a: Gyarados");
    assert_eq!(last.last().map(String::as_str), Some("|win|p1"));

    let json = trace::to_json(trace).unwrap();
    assert_eq!(trace::from_json(&json).unwrap(), trace);
}

#[test]
fn test_messages_stay_empty_without_protocol_log() {
    let mut d = stub_driver(vec![mon(300, 900, 90)], vec![mon(300, 60, 80)], DriverConfig::default());
    d.run(FirstChoice, FirstChoice).unwrap();
    assert!(d.trace().iter().all(|e| e.messages.is_empty()));
    assert!(!trace::to_json(d.trace()).unwrap().contains("messages"));
}

#[test]
fn test_engine_error_terminates_without_retry() {
    let mut d = broken_driver(4, None);
    let err = d.start().unwrap_err();
    assert_eq!(err, DriverError::Bridge(BridgeError::EngineError { raw: 4 }));
    assert_eq!(d.phase(), Phase::Terminal);
    assert_eq!(d.outcome(), Outcome::Error);
    assert!(d.trace().is_empty());
    assert_eq!(d.steps(), 0);
}

#[test]
fn test_undecodable_buffer_terminates() {
    // p1 order[0] = 9 is not a party slot
    let mut d = broken_driver(0, Some((176, 9)));
    let err = d.start().unwrap_err();
    assert!(matches!(err, DriverError::Codec(_)));
    assert_eq!(d.phase(), Phase::Terminal);
    assert_eq!(d.outcome(), Outcome::Error);
}

#[test]
fn test_run_plays_to_a_result_and_traces_every_step() {
    let mut d = stub_driver(
        vec![mon(300, 200, 90), mon(300, 200, 90)],
        vec![mon(300, 60, 80), mon(300, 60, 80)],
        DriverConfig::default(),
    );
    let outcome = d.run(FirstChoice, FirstChoice).unwrap();
    assert_eq!(outcome, Outcome::P1Win);
    assert_eq!(d.phase(), Phase::Terminal);

    let trace = d.trace();
    assert_eq!(trace.len() as u64, d.steps());
    assert_eq!(trace[0].p1, Choice::PASS);
    for (i, entry) in trace.iter().enumerate() {
        assert_eq!(entry.step, i as u64 + 1);
    }
    let (last, earlier) = trace.split_last().unwrap();
    assert!(earlier.iter().all(|e| e.outcome == Outcome::Ongoing));
    assert_eq!(last.outcome, Outcome::P1Win);
    assert_eq!(&last.state, d.state());
    assert_eq!(decode(d.buffer().as_bytes(), Generation::One).unwrap(), *d.state());

    // p2 had to replace its fainted lead at some point
    assert!(
        trace
            .iter()
            .any(|e| e.p2.kind() == ChoiceKind::Switch && e.p1 == Choice::PASS)
    );
}

#[test]
fn test_turn_limit_halts_between_turns() {
    let config = DriverConfig {
        max_turns: 2,
        ..DriverConfig::default()
    };
    let mut d = stub_driver(vec![mon(900, 40, 90)], vec![mon(900, 40, 80)], config);
    let outcome = d.run(FirstChoice, FirstChoice).unwrap();
    assert_eq!(outcome, Outcome::Ongoing);
    assert_eq!(d.phase(), Phase::AwaitingChoices);
    assert_eq!(d.state().turn, 3);
    assert_eq!(d.steps(), 3);
}

#[test]
fn test_trace_can_be_disabled() {
    let config = DriverConfig {
        record_trace: false,
        ..DriverConfig::default()
    };
    let mut d = stub_driver(vec![mon(100, 200, 90)], vec![mon(100, 60, 80)], config);
    d.run(FirstChoice, FirstChoice).unwrap();
    assert!(d.trace().is_empty());
    assert!(d.steps() > 0);
}

#[test]
fn test_trace_json_round_trip() {
    let mut d = stub_driver(vec![mon(300, 200, 90)], vec![mon(300, 60, 80)], DriverConfig::default());
    d.run(RandomChoice::new(3u64), RandomChoice::new(4u64)).unwrap();

    let json = trace::to_json(d.trace()).unwrap();
    let back = trace::from_json(&json).unwrap();
    assert_eq!(back, d.trace());

    let mut bytes = Vec::new();
    trace::write_json(&mut bytes, d.trace()).unwrap();
    assert_eq!(trace::read_json(bytes.as_slice()).unwrap(), back);
}

#[test]
fn test_same_seeds_replay_identically() {
    let play = || {
        let mut d = stub_driver(
            vec![mon(300, 120, 80), mon(250, 90, 100)],
            vec![mon(300, 120, 80), mon(250, 90, 100)],
            DriverConfig::default(),
        );
        d.run(RandomChoice::new(10u64), RandomChoice::new(20u64)).unwrap();
        d.take_trace()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_borrowed_policies_keep_their_state() {
    let mut d = stub_driver(vec![mon(300, 200, 90)], vec![mon(300, 60, 80)], DriverConfig::default());
    let mut p1 = RandomChoice::new(1u64);
    let mut p2 = RandomChoice::new(2u64);
    d.run(&mut p1, &mut p2).unwrap();
    assert!(p1.rng().call_count() > 0);
    assert!(p2.rng().call_count() > 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_random_battles_never_error(seed in any::<u64>(), a in any::<u64>(), b in any::<u64>()) {
        let mut d = BattleDriver::from_teams(
            StubEngine::new(),
            vec![mon(200, 80, 70), mon(150, 120, 110)],
            vec![mon(180, 100, 90), mon(220, 60, 60)],
            seed,
            DriverConfig { max_turns: 200, ..DriverConfig::default() },
        ).unwrap();
        let outcome = d.run(RandomChoice::new(a), RandomChoice::new(b)).unwrap();
        prop_assert_ne!(outcome, Outcome::Error);
        prop_assert_eq!(d.trace().len() as u64, d.steps());
        prop_assert!(d.trace().windows(2).all(|w| w[0].state.turn <= w[1].state.turn));
    }
}
