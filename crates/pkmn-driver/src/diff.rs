//! Field-level differences between two decoded battle states.
//!
//! Used to summarise what a step changed, or to compare the same step taken
//! by two engines. Severity says how much a difference matters for parity:
//! HP and the active species are critical, anything that drives later
//! damage or ordering is major, bookkeeping is minor.

use core::fmt;

use pkmn_core::{ActivePokemon, BattleState, Player, SideState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Minor => write!(f, "MINOR"),
            Severity::Major => write!(f, "MAJOR"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// One changed field, named by its layout path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub severity: Severity,
    pub field: String,
    pub before: String,
    pub after: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} -> {}",
            self.severity, self.field, self.before, self.after
        )
    }
}

/// Every field that differs between `before` and `after`.
pub fn diff_states(before: &BattleState, after: &BattleState) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    diff_field(&mut changes, Severity::Major, "turn", before.turn, after.turn);
    diff_field(
        &mut changes,
        Severity::Minor,
        "last_damage",
        before.last_damage,
        after.last_damage,
    );
    for player in [Player::P1, Player::P2] {
        let i = player.index();
        diff_field(
            &mut changes,
            Severity::Minor,
            &format!("last_moves.{player}"),
            before.last_moves[i],
            after.last_moves[i],
        );
        diff_side(&mut changes, &player.to_string(), before.side(player), after.side(player));
    }
    if before.rng != after.rng {
        changes.push(FieldChange {
            severity: Severity::Minor,
            field: "rng".into(),
            before: format!("{:#018x}", before.rng),
            after: format!("{:#018x}", after.rng),
        });
    }

    changes
}

/// Only the critical changes, e.g. for a quick parity verdict.
pub fn critical(changes: &[FieldChange]) -> impl Iterator<Item = &FieldChange> {
    changes.iter().filter(|c| c.severity == Severity::Critical)
}

fn diff_side(changes: &mut Vec<FieldChange>, prefix: &str, before: &SideState, after: &SideState) {
    if before.order != after.order {
        changes.push(FieldChange {
            severity: Severity::Major,
            field: format!("{prefix}.order"),
            before: format!("{:?}", before.order),
            after: format!("{:?}", after.order),
        });
    }
    if before.team.len() != after.team.len() {
        changes.push(FieldChange {
            severity: Severity::Critical,
            field: format!("{prefix}.team.len"),
            before: before.team.len().to_string(),
            after: after.team.len().to_string(),
        });
    }

    for (slot, (b, a)) in before.team.iter().zip(&after.team).enumerate() {
        let path = format!("{prefix}.pokemon[{slot}]");
        diff_field(changes, Severity::Critical, &format!("{path}.hp"), b.hp, a.hp);
        diff_field(changes, Severity::Major, &format!("{path}.status"), b.status, a.status);
        for (index, (bm, am)) in b.moves.iter().zip(&a.moves).enumerate() {
            diff_field(
                changes,
                Severity::Minor,
                &format!("{path}.moves[{index}].pp"),
                bm.pp,
                am.pp,
            );
        }
    }

    diff_field(
        changes,
        Severity::Minor,
        &format!("{prefix}.last_selected_move"),
        before.last_selected_move,
        after.last_selected_move,
    );
    diff_field(
        changes,
        Severity::Minor,
        &format!("{prefix}.last_used_move"),
        before.last_used_move,
        after.last_used_move,
    );
    diff_active(changes, &format!("{prefix}.active"), &before.active, &after.active);
}

fn diff_active(
    changes: &mut Vec<FieldChange>,
    prefix: &str,
    before: &ActivePokemon,
    after: &ActivePokemon,
) {
    diff_field(
        changes,
        Severity::Critical,
        &format!("{prefix}.species"),
        before.species,
        after.species,
    );

    const BOOSTS: [&str; 6] = ["atk", "def", "spe", "spc", "accuracy", "evasion"];
    let (b, a) = (before.boosts.values(), after.boosts.values());
    for (name, (bv, av)) in BOOSTS.iter().zip(b.into_iter().zip(a)) {
        diff_field(
            changes,
            Severity::Major,
            &format!("{prefix}.boosts.{name}"),
            bv,
            av,
        );
    }

    if before.volatiles != after.volatiles {
        changes.push(FieldChange {
            severity: Severity::Major,
            field: format!("{prefix}.volatiles"),
            before: format!("{:?}", before.volatiles),
            after: format!("{:?}", after.volatiles),
        });
    }

    for (index, (bm, am)) in before.moves.iter().zip(&after.moves).enumerate() {
        diff_field(
            changes,
            Severity::Minor,
            &format!("{prefix}.moves[{index}].pp"),
            bm.pp,
            am.pp,
        );
    }
}

fn diff_field<T: PartialEq + fmt::Display>(
    changes: &mut Vec<FieldChange>,
    severity: Severity,
    field: &str,
    before: T,
    after: T,
) {
    if before != after {
        changes.push(FieldChange {
            severity,
            field: field.into(),
            before: before.to_string(),
            after: after.to_string(),
        });
    }
}
