//! Bridge preconditions and result translation, against scripted engines.

use pkmn_core::protocol::{self, Slots};
use pkmn_core::{
    BattleBuffer, BattleState, Choice, ChoiceKind, EngineResult, Generation, Outcome, Player,
    Pokemon, PokemonType, ResultKind, Seed, Stats, Types, decode, encode,
};
use pkmn_engine::{BattleEngine, BridgeError, EngineBridge, StubEngine};

/// Replies with fixed bytes and counts how often it was reached.
#[derive(Default)]
struct Scripted {
    reply: u8,
    options: Vec<u8>,
    align: usize,
    updates: usize,
    choice_calls: usize,
}

impl BattleEngine for Scripted {
    fn generation(&self) -> Generation {
        Generation::One
    }

    fn required_alignment(&self) -> usize {
        self.align.max(1)
    }

    fn update(&mut self, buffer: &mut [u8], _c1: u8, _c2: u8) -> u8 {
        self.updates += 1;
        buffer[0] ^= 0xFF;
        self.reply
    }

    fn choices(
        &mut self,
        _buffer: &mut [u8],
        _player: Player,
        _request: ChoiceKind,
        out: &mut [u8],
    ) -> usize {
        self.choice_calls += 1;
        for (dst, &b) in out.iter_mut().zip(&self.options) {
            *dst = b;
        }
        self.options.len()
    }
}

#[repr(C, align(8))]
struct Aligned([u8; 400]);

fn mon(hp: u16, atk: u16, spe: u16) -> Pokemon {
    Pokemon::new(25, 100, Stats::new(hp, atk, 100, spe, 100), Types::single(PokemonType::Electric))
        .with_move(85, 15)
}

fn battle(p1: Vec<Pokemon>, p2: Vec<Pokemon>) -> BattleBuffer {
    encode(&BattleState::new(p1, p2, Seed::new(0x1234)), Generation::One).unwrap()
}

#[test]
fn test_short_buffer_never_reaches_engine() {
    let mut bridge = EngineBridge::new(Scripted::default());
    let mut bytes = vec![0u8; 383];

    let err = bridge.advance(&mut bytes, Choice::PASS, Choice::PASS).unwrap_err();
    assert_eq!(err, BridgeError::BufferLength { expected: 384, actual: 383 });

    let err = bridge.choices(&mut bytes, Player::P1, ChoiceKind::Move).unwrap_err();
    assert!(matches!(err, BridgeError::BufferLength { .. }));

    assert_eq!(bridge.calls(), 0);
    assert_eq!(bridge.engine().updates, 0);
    assert_eq!(bridge.engine().choice_calls, 0);
    assert!(bytes.iter().all(|&b| b == 0));
}

#[test]
fn test_misaligned_buffer_never_reaches_engine() {
    let mut bridge = EngineBridge::new(Scripted {
        align: 8,
        ..Scripted::default()
    });
    let mut storage = Aligned([0; 400]);

    let err = bridge
        .advance(&mut storage.0[1..385], Choice::PASS, Choice::PASS)
        .unwrap_err();
    assert!(matches!(err, BridgeError::Misaligned { align: 8, .. }));
    assert_eq!(bridge.engine().updates, 0);

    // the same engine accepts an aligned window
    bridge
        .advance(&mut storage.0[8..392], Choice::PASS, Choice::PASS)
        .unwrap();
    assert_eq!(bridge.engine().updates, 1);
    assert_eq!(storage.0[8], 0xFF);
}

#[test]
fn test_error_result_is_reported() {
    let mut bridge = EngineBridge::new(Scripted {
        reply: ResultKind::Error as u8,
        ..Scripted::default()
    });
    let mut buf = BattleBuffer::zeroed(Generation::One);

    let err = bridge
        .advance(buf.as_mut_bytes(), Choice::PASS, Choice::PASS)
        .unwrap_err();
    assert_eq!(err, BridgeError::EngineError { raw: 4 });
    assert_eq!(bridge.calls(), 1);
}

#[test]
fn test_unknown_result_is_a_mismatch() {
    let mut bridge = EngineBridge::new(Scripted {
        reply: 5,
        ..Scripted::default()
    });
    let mut buf = BattleBuffer::zeroed(Generation::One);

    let err = bridge
        .advance(buf.as_mut_bytes(), Choice::PASS, Choice::PASS)
        .unwrap_err();
    match err {
        BridgeError::UnknownResult { raw, source } => {
            assert_eq!(raw, 5);
            assert_eq!(source.field, "result.type");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_result_requests_are_decoded() {
    let reply = EngineResult {
        kind: ResultKind::None,
        p1: ChoiceKind::Switch,
        p2: ChoiceKind::Pass,
    };
    let mut bridge = EngineBridge::new(Scripted {
        reply: reply.to_byte(),
        ..Scripted::default()
    });
    let mut buf = BattleBuffer::zeroed(Generation::One);

    let result = bridge
        .advance(buf.as_mut_bytes(), Choice::use_move(1).unwrap(), Choice::PASS)
        .unwrap();
    assert_eq!(result, reply);
    assert_eq!(result.request(Player::P1), ChoiceKind::Switch);
    assert_eq!(result.outcome(), Outcome::Ongoing);
}

#[test]
fn test_choices_are_decoded() {
    let options = vec![
        Choice::use_move(1).unwrap().to_byte(),
        Choice::switch(2).unwrap().to_byte(),
    ];
    let mut bridge = EngineBridge::new(Scripted {
        options,
        ..Scripted::default()
    });
    let mut buf = BattleBuffer::zeroed(Generation::One);

    let choices = bridge
        .choices(buf.as_mut_bytes(), Player::P2, ChoiceKind::Move)
        .unwrap();
    assert_eq!(choices, vec![Choice::use_move(1).unwrap(), Choice::switch(2).unwrap()]);
}

#[test]
fn test_no_choices_is_an_error() {
    let mut bridge = EngineBridge::new(Scripted::default());
    let mut buf = BattleBuffer::zeroed(Generation::One);

    let err = bridge
        .choices(buf.as_mut_bytes(), Player::P1, ChoiceKind::Switch)
        .unwrap_err();
    assert_eq!(
        err,
        BridgeError::NoChoices {
            player: Player::P1,
            request: ChoiceKind::Switch
        }
    );
}

#[test]
fn test_invalid_choice_byte_is_rejected() {
    let mut bridge = EngineBridge::new(Scripted {
        options: vec![0b11],
        ..Scripted::default()
    });
    let mut buf = BattleBuffer::zeroed(Generation::One);

    let err = bridge
        .choices(buf.as_mut_bytes(), Player::P1, ChoiceKind::Move)
        .unwrap_err();
    assert!(matches!(err, BridgeError::InvalidChoice(_)));
}

#[test]
fn test_stub_battle_runs_to_a_win() {
    let mut bridge = EngineBridge::new(StubEngine::new());
    let mut buf = battle(vec![mon(200, 120, 90)], vec![mon(60, 40, 50)]);

    let start = bridge
        .advance(buf.as_mut_bytes(), Choice::PASS, Choice::PASS)
        .unwrap();
    assert_eq!((start.p1, start.p2), (ChoiceKind::Move, ChoiceKind::Move));
    assert_eq!(buf.turn(), 1);

    let mut last = start;
    for _ in 0..10 {
        let c1 = bridge.choices(buf.as_mut_bytes(), Player::P1, last.p1).unwrap()[0];
        let c2 = bridge.choices(buf.as_mut_bytes(), Player::P2, last.p2).unwrap()[0];
        last = bridge.advance(buf.as_mut_bytes(), c1, c2).unwrap();
        if last.is_terminal() {
            break;
        }
    }
    assert_eq!(last.outcome(), Outcome::P1Win);
    assert_eq!(buf.hp(Player::P2, 0).unwrap(), 0);
    // 30 + roll per hit, so the second hit finishes a 60 hp foe
    assert_eq!(buf.turn(), 3);
}

#[test]
fn test_borrowed_engine_counts_through() {
    let mut engine = Scripted::default();
    let mut buf = BattleBuffer::zeroed(Generation::One);
    {
        let mut bridge = EngineBridge::new(&mut engine);
        bridge
            .advance(buf.as_mut_bytes(), Choice::PASS, Choice::PASS)
            .unwrap();
    }
    assert_eq!(engine.updates, 1);
}

#[test]
fn test_short_log_never_reaches_engine() {
    let mut bridge = EngineBridge::new(Scripted::default());
    let mut buf = BattleBuffer::zeroed(Generation::One);
    let mut log = vec![0xAAu8; 511];

    let err = bridge
        .advance_logged(buf.as_mut_bytes(), Choice::PASS, Choice::PASS, &mut log)
        .unwrap_err();
    assert_eq!(err, BridgeError::LogLength { expected: 512, actual: 511 });
    assert_eq!(bridge.calls(), 0);
    assert_eq!(bridge.engine().updates, 0);
    assert!(log.iter().all(|&b| b == 0xAA));
}

#[test]
fn test_engines_without_logging_leave_the_log_zeroed() {
    let mut bridge = EngineBridge::new(Scripted::default());
    let mut buf = BattleBuffer::zeroed(Generation::One);
    let mut log = vec![0xAAu8; Generation::One.logs_len()];

    bridge
        .advance_logged(buf.as_mut_bytes(), Choice::PASS, Choice::PASS, &mut log)
        .unwrap();
    assert_eq!(bridge.engine().updates, 1);
    assert!(log.iter().all(|&b| b == 0));
}

#[test]
fn test_stub_writes_a_parsable_log() {
    let mut bridge = EngineBridge::new(StubEngine::new());
    let mut buf = battle(vec![mon(200, 120, 90)], vec![mon(60, 40, 50)]);
    let slots = Slots::from_state(&decode(buf.as_bytes(), Generation::One).unwrap());
    let mut log = vec![0u8; Generation::One.logs_len()];

    bridge
        .advance_logged(buf.as_mut_bytes(), Choice::PASS, Choice::PASS, &mut log)
        .unwrap();
    assert_eq!(
        protocol::parse(&log, &slots).unwrap(),
        [
            "|switch|p1a: Pikachu|Pikachu|200/200",
            "|switch|p2a: Pikachu|Pikachu|60/60",
            "|turn|1",
        ]
    );

    let mv = Choice::use_move(1).unwrap();
    bridge
        .advance_logged(buf.as_mut_bytes(), mv, mv, &mut log)
        .unwrap();
    let lines = protocol::parse(&log, &slots).unwrap();
    assert_eq!(lines[0], "|move|p1a: Pikachu|Thunderbolt|p2a: Pikachu");
    assert_eq!(lines.last().map(String::as_str), Some("|turn|2"));
}
