//! Pure-Rust stand-in for libpkmn.
//!
//! Reads and writes the real Gen I buffer layout but plays by deliberately
//! small rules: every move hits for `max(1, atk / 4) + roll(0..8)`, faster
//! side first, speed ties and rolls drawn from the PSRNG stored in the
//! buffer. Enough to exercise the bridge and driver without the native
//! library; not a battle simulator.

use pkmn_core::protocol::{Ident, LogWriter};
use pkmn_core::{
    ActivePokemon, BattleState, Choice, ChoiceKind, EngineResult, Generation, Player, Psrng,
    ResultKind, SideState, decode, encode_into,
};

use crate::BattleEngine;

/// Remembers the requests of its last successful step, which is what the
/// next choices must answer; edits between steps do not change them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubEngine {
    pending: Option<[ChoiceKind; 2]>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&mut self, buffer: &mut [u8], c1: u8, c2: u8, mut log: LogWriter<'_>) -> u8 {
        let generation = self.generation();
        let Ok(mut state) = decode(buffer, generation) else {
            return ERROR;
        };
        let (Ok(c1), Ok(c2)) = (Choice::from_byte(c1), Choice::from_byte(c2)) else {
            return ERROR;
        };
        let Some(result) = step(&mut state, self.pending, c1, c2, &mut log) else {
            return ERROR;
        };
        match encode_into(&state, buffer, generation) {
            Ok(()) => {
                self.pending = Some([result.p1, result.p2]);
                result.to_byte()
            }
            Err(_) => ERROR,
        }
    }
}

const ERROR: u8 = ResultKind::Error as u8;
/// Engine move id logged for Struggle.
const STRUGGLE_ID: u8 = 165;

/// What each side is expected to answer next, read off the state.
fn requests(state: &BattleState) -> [ChoiceKind; 2] {
    if state.turn == 0 {
        return [ChoiceKind::Pass; 2];
    }
    let fainted = state
        .sides
        .each_ref()
        .map(|s| s.lead().is_none_or(|p| p.is_fainted()));
    if fainted.contains(&true) {
        fainted.map(|f| if f { ChoiceKind::Switch } else { ChoiceKind::Pass })
    } else {
        [ChoiceKind::Move; 2]
    }
}

fn result_kind(state: &BattleState) -> ResultKind {
    match (state.sides[0].is_defeated(), state.sides[1].is_defeated()) {
        (true, true) => ResultKind::Tie,
        (false, true) => ResultKind::Win,
        (true, false) => ResultKind::Lose,
        (false, false) => ResultKind::None,
    }
}

/// Battle positions (1-based) holding a healthy benched creature.
fn switch_targets(side: &SideState) -> impl Iterator<Item = u8> + '_ {
    (1..side.order.len()).filter_map(move |pos| {
        let slot = side.slot_at(pos)?;
        let healthy = side.team.get(slot).is_some_and(|p| !p.is_fainted());
        healthy.then_some(pos as u8 + 1)
    })
}

fn legal(state: &BattleState, player: Player, request: ChoiceKind) -> Vec<Choice> {
    let side = state.side(player);
    let switches = || {
        switch_targets(side)
            .filter_map(|pos| Choice::switch(pos).ok())
            .collect::<Vec<_>>()
    };
    match request {
        ChoiceKind::Pass => vec![Choice::PASS],
        ChoiceKind::Switch => switches(),
        ChoiceKind::Move => {
            let mut out: Vec<Choice> = side
                .active
                .moves
                .iter()
                .enumerate()
                .filter(|(_, m)| !m.is_empty() && m.pp > 0)
                .filter_map(|(i, _)| Choice::use_move(i as u8 + 1).ok())
                .collect();
            if out.is_empty() {
                out.push(Choice::STRUGGLE);
            }
            out.extend(switches());
            out
        }
    }
}

/// The active creature's log identity.
fn active_ident(state: &BattleState, player: Player) -> Option<Ident> {
    let slot = *state.side(player).order.first()?;
    Some(Ident::new(player, slot))
}

fn send_out(state: &mut BattleState, player: Player, log: &mut LogWriter<'_>) -> Option<()> {
    let side = state.side_mut(player);
    let lead = side.lead()?;
    side.active = ActivePokemon::from_pokemon(lead);
    let ident = active_ident(state, player)?;
    log.switch(ident, state.side(player).lead()?).ok()
}

fn switch_in(
    state: &mut BattleState,
    player: Player,
    position: u8,
    log: &mut LogWriter<'_>,
) -> Option<()> {
    let side = state.side_mut(player);
    let pos = (position as usize).checked_sub(1)?;
    if pos == 0 || pos >= side.order.len() {
        return None;
    }
    side.order.swap(0, pos);
    send_out(state, player, log)
}

/// Damage dealt by `attacker` using 1-based move `slot` (0 = Struggle).
fn attack(
    state: &mut BattleState,
    rng: &mut Psrng,
    attacker: Player,
    slot: u8,
    log: &mut LogWriter<'_>,
) -> Option<()> {
    let a = attacker.index();
    let d = attacker.foe().index();

    let move_id = if slot == 0 {
        0
    } else {
        let index = slot as usize - 1;
        let lead = state.sides[a].slot_at(0)?;
        let active = state.sides[a].active.moves.get_mut(index)?;
        active.pp = active.pp.saturating_sub(1);
        let id = active.id;
        if let Some(m) = state.sides[a].team.get_mut(lead)?.moves.get_mut(index) {
            m.pp = m.pp.saturating_sub(1);
        }
        id
    };
    let source = active_ident(state, attacker)?;
    let target_ident = active_ident(state, attacker.foe())?;
    let logged_id = if slot == 0 { STRUGGLE_ID } else { move_id };
    log.used_move(source, logged_id, target_ident).ok()?;

    let damage = (state.sides[a].active.stats.atk / 4).max(1) + rng.range(0, 8) as u16;
    let target = state.sides[d].slot_at(0)?;
    let foe = state.sides[d].team.get_mut(target)?;
    foe.hp = foe.hp.saturating_sub(damage);
    log.damage(target_ident, foe).ok()?;
    if foe.is_fainted() {
        log.faint(target_ident).ok()?;
    }

    state.last_damage = damage;
    state.last_moves[a] = slot;
    state.sides[a].last_selected_move = move_id;
    state.sides[a].last_used_move = move_id;
    Some(())
}

fn valid(state: &BattleState, player: Player, request: ChoiceKind, choice: Choice) -> bool {
    legal(state, player, request).contains(&choice)
}

fn log_end(kind: ResultKind, log: &mut LogWriter<'_>) -> Option<()> {
    match kind {
        ResultKind::Win => log.win(Player::P1).ok(),
        ResultKind::Lose => log.win(Player::P2).ok(),
        ResultKind::Tie => log.tie().ok(),
        ResultKind::None | ResultKind::Error => Some(()),
    }
}

fn step(
    state: &mut BattleState,
    pending: Option<[ChoiceKind; 2]>,
    c1: Choice,
    c2: Choice,
    log: &mut LogWriter<'_>,
) -> Option<EngineResult> {
    // an edit between steps may already have decided the battle
    if state.turn > 0 {
        let kind = result_kind(state);
        if kind != ResultKind::None {
            log_end(kind, log)?;
            return Some(EngineResult {
                kind,
                p1: ChoiceKind::Pass,
                p2: ChoiceKind::Pass,
            });
        }
    }

    let [r1, r2] = pending.unwrap_or_else(|| requests(state));
    if !valid(state, Player::P1, r1, c1) || !valid(state, Player::P2, r2, c2) {
        return None;
    }

    let mut rng = state.rng();
    if state.turn == 0 {
        for player in [Player::P1, Player::P2] {
            send_out(state, player, log)?;
        }
        state.turn = 1;
    } else {
        let choices = [(Player::P1, c1), (Player::P2, c2)];
        for (player, choice) in choices {
            if choice.kind() == ChoiceKind::Switch {
                switch_in(state, player, choice.data(), log)?;
            }
        }

        let movers: Vec<(Player, u8)> = choices
            .into_iter()
            .filter(|(_, c)| c.kind() == ChoiceKind::Move)
            .map(|(p, c)| (p, c.data()))
            .collect();
        let ordered = match movers.as_slice() {
            [first, second] => {
                let s1 = state.sides[0].active.stats.spe;
                let s2 = state.sides[1].active.stats.spe;
                let p1_first = s1 > s2 || (s1 == s2 && rng.chance(1, 2));
                if p1_first {
                    vec![*first, *second]
                } else {
                    vec![*second, *first]
                }
            }
            other => other.to_vec(),
        };
        for (player, slot) in ordered {
            let fainted = state.side(player).lead().is_none_or(|p| p.is_fainted());
            if !fainted {
                attack(state, &mut rng, player, slot, log)?;
            }
        }
        if r1 == ChoiceKind::Move {
            state.turn = state.turn.saturating_add(1);
        }
    }
    state.rng = rng.state();

    let kind = result_kind(state);
    let [p1, p2] = if kind == ResultKind::None {
        requests(state)
    } else {
        [ChoiceKind::Pass; 2]
    };
    if kind != ResultKind::None {
        log_end(kind, log)?;
    } else if [p1, p2] == [ChoiceKind::Move; 2] {
        log.turn(state.turn).ok()?;
    }
    Some(EngineResult { kind, p1, p2 })
}

impl BattleEngine for StubEngine {
    fn generation(&self) -> Generation {
        Generation::One
    }

    fn update(&mut self, buffer: &mut [u8], c1: u8, c2: u8) -> u8 {
        self.run(buffer, c1, c2, LogWriter::disabled())
    }

    fn update_logged(&mut self, buffer: &mut [u8], c1: u8, c2: u8, log: &mut [u8]) -> u8 {
        self.run(buffer, c1, c2, LogWriter::new(log))
    }

    fn choices(
        &mut self,
        buffer: &mut [u8],
        player: Player,
        request: ChoiceKind,
        out: &mut [u8],
    ) -> usize {
        let Ok(state) = decode(buffer, self.generation()) else {
            return 0;
        };
        let options = legal(&state, player, request);
        let count = options.len().min(out.len());
        for (dst, choice) in out.iter_mut().zip(options) {
            *dst = choice.to_byte();
        }
        count
    }
}
