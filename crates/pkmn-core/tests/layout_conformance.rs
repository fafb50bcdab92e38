//! The Gen I table must describe the whole 384-byte buffer: every bit owned
//! by exactly one field or one scratch range, nothing out of bounds.

use std::collections::HashMap;

use pkmn_core::Generation;
use pkmn_core::layout::{FieldEntry, GEN1};

fn owners() -> Vec<Vec<String>> {
    let table = &GEN1;
    let len = table.buffer_len();
    let mut owners = vec![Vec::new(); len * 8];
    for FieldEntry { path, field } in table.fields() {
        assert!(
            field.offset + field.width <= len,
            "{path} word ends past the buffer"
        );
        assert!(
            field.shift + field.bits <= field.width as u32 * 8,
            "{path} bits spill out of their word"
        );
        let start = field.bit_start();
        for bit in start..start + field.bits as usize {
            owners[bit].push(path.clone());
        }
    }
    for range in table.scratch {
        assert!(range.offset + range.len <= len);
        for bit in range.offset * 8..(range.offset + range.len) * 8 {
            owners[bit].push(format!("scratch@{}", range.offset));
        }
    }
    owners
}

#[test]
fn test_every_bit_owned_exactly_once() {
    for (bit, who) in owners().iter().enumerate() {
        assert_eq!(
            who.len(),
            1,
            "byte {} bit {} owned by {:?}",
            bit / 8,
            bit % 8,
            who
        );
    }
}

#[test]
fn test_field_paths_unique() {
    let mut seen = HashMap::new();
    for entry in GEN1.fields() {
        if let Some(prev) = seen.insert(entry.path.clone(), entry.field) {
            panic!("{} listed twice ({prev:?})", entry.path);
        }
    }
}

#[test]
fn test_struct_sizes_add_up() {
    let t = &GEN1;
    assert_eq!(t.buffer_len(), 384);
    assert_eq!(Generation::One.buffer_len(), 384);
    assert_eq!(t.battle.sides[1], t.side.size);
    assert_eq!(t.side.size * 2, t.battle.turn.offset);
    assert_eq!(t.side.pokemon + t.capacity.team * t.pokemon.size, t.side.active);
    assert_eq!(t.side.active + t.active.size, t.side.order.offset);
    assert_eq!(t.side.order.offset + t.capacity.team, t.side.last_selected_move.offset);
    assert_eq!(t.side.last_used_move.offset + 1, t.side.size);
    assert_eq!(t.pokemon.moves + t.capacity.moves * t.move_slot.size, t.pokemon.hp.offset);
    assert_eq!(t.active.moves + t.capacity.moves * t.move_slot.size, t.active.size);
    assert_eq!(t.stats.size, 10);
    assert_eq!(t.scratch_len(), 5);
}

#[test]
fn test_known_offsets() {
    let find = |path: &str| {
        GEN1.fields()
            .into_iter()
            .find(|e| e.path == path)
            .map(|e| (e.field.offset, e.field.shift))
    };
    assert_eq!(find("p1.pokemon[0].hp"), Some((18, 0)));
    assert_eq!(find("p2.pokemon[5].level"), Some((184 + 5 * 24 + 23, 0)));
    assert_eq!(find("p2.active.boosts.evasion"), Some((184 + 144 + 12, 20)));
    assert_eq!(find("p1.active.volatiles.toxic"), Some((144 + 16, 59)));
    assert_eq!(find("p2.order[5]"), Some((184 + 176 + 5, 0)));
    assert_eq!(find("last_moves.p2"), Some((372, 4)));
    assert_eq!(find("rng"), Some((376, 0)));
}
