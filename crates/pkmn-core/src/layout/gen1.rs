use super::{
    ActiveLayout, BattleLayout, BoostsLayout, Capacity, Field, Generation, LayoutTable,
    MoveSlotLayout, PokemonLayout, ScratchRange, SideLayout, StatsLayout, VolatilesLayout,
};

const fn vol(name: &'static str, shift: u32, bits: u32) -> Field {
    Field::packed(name, 16, 8, shift, bits)
}

const fn boost(name: &'static str, shift: u32) -> Field {
    Field::packed(name, 12, 4, shift, 4)
}

/// Generation I (RBY), 384-byte battle.
pub static GEN1: LayoutTable = LayoutTable {
    generation: Generation::One,
    battle: BattleLayout {
        size: 384,
        sides: [0, 184],
        turn: Field::u16("turn", 368),
        last_damage: Field::u16("last_damage", 370),
        last_move_p1: Field::packed("last_moves.p1", 372, 1, 0, 4),
        last_move_p2: Field::packed("last_moves.p2", 372, 1, 4, 4),
        rng: Field::u64("rng", 376),
    },
    side: SideLayout {
        size: 184,
        pokemon: 0,
        active: 144,
        order: Field::byte("order", 176),
        last_selected_move: Field::byte("last_selected_move", 182),
        last_used_move: Field::byte("last_used_move", 183),
    },
    pokemon: PokemonLayout {
        size: 24,
        stats: 0,
        moves: 10,
        hp: Field::u16("hp", 18),
        status: Field::byte("status", 20),
        species: Field::byte("species", 21),
        type1: Field::packed("type1", 22, 1, 0, 4),
        type2: Field::packed("type2", 22, 1, 4, 4),
        level: Field::byte("level", 23),
    },
    active: ActiveLayout {
        size: 32,
        stats: 0,
        moves: 24,
        species: Field::byte("species", 10),
        type1: Field::packed("type1", 11, 1, 0, 4),
        type2: Field::packed("type2", 11, 1, 4, 4),
        // bits 24..32 of the boosts word are engine scratch
        boosts: BoostsLayout {
            atk: boost("atk", 0),
            def: boost("def", 4),
            spe: boost("spe", 8),
            spc: boost("spc", 12),
            accuracy: boost("accuracy", 16),
            evasion: boost("evasion", 20),
        },
        volatiles: VolatilesLayout {
            flags: vol("flags", 0, 18),
            confusion: vol("confusion", 18, 3),
            attacks: vol("attacks", 21, 3),
            state: vol("state", 24, 16),
            substitute: vol("substitute", 40, 8),
            transform: vol("transform", 48, 4),
            disable_duration: vol("disable_duration", 52, 4),
            disable_move: vol("disable_move", 56, 3),
            toxic: vol("toxic", 59, 5),
        },
    },
    stats: StatsLayout {
        size: 10,
        hp: Field::u16("hp", 0),
        atk: Field::u16("atk", 2),
        def: Field::u16("def", 4),
        spe: Field::u16("spe", 6),
        spc: Field::u16("spc", 8),
    },
    move_slot: MoveSlotLayout {
        size: 2,
        id: Field::byte("id", 0),
        pp: Field::byte("pp", 1),
    },
    capacity: Capacity {
        team: 6,
        moves: 4,
        choices: 9,
        logs: 512,
    },
    type_count: 15,
    scratch: &[
        ScratchRange { offset: 159, len: 1 },
        ScratchRange { offset: 343, len: 1 },
        ScratchRange { offset: 373, len: 3 },
    ],
};
