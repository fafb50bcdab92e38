//! Generation I (RBY) species and moves, in engine id order.

use super::{Move, Species};
use crate::model::PokemonType::{self, *};

const fn one(name: &'static str, base: [u16; 5], t: PokemonType) -> Species {
    Species::new(name, base, t, t)
}

const fn two(name: &'static str, base: [u16; 5], t1: PokemonType, t2: PokemonType) -> Species {
    Species::new(name, base, t1, t2)
}

/// Base stats are `[hp, atk, def, spe, spc]`.
pub static SPECIES: &[Species] = &[
    two("Bulbasaur", [45, 49, 49, 45, 65], Grass, Poison),
    two("Ivysaur", [60, 62, 63, 60, 80], Grass, Poison),
    two("Venusaur", [80, 82, 83, 80, 100], Grass, Poison),
    one("Charmander", [39, 52, 43, 65, 50], Fire),
    one("Charmeleon", [58, 64, 58, 80, 65], Fire),
    two("Charizard", [78, 84, 78, 100, 85], Fire, Flying),
    one("Squirtle", [44, 48, 65, 43, 50], Water),
    one("Wartortle", [59, 63, 80, 58, 65], Water),
    one("Blastoise", [79, 83, 100, 78, 85], Water),
    one("Caterpie", [45, 30, 35, 45, 20], Bug),
    one("Metapod", [50, 20, 55, 30, 25], Bug),
    two("Butterfree", [60, 45, 50, 70, 80], Bug, Flying),
    two("Weedle", [40, 35, 30, 50, 20], Bug, Poison),
    two("Kakuna", [45, 25, 50, 35, 25], Bug, Poison),
    two("Beedrill", [65, 80, 40, 75, 45], Bug, Poison),
    two("Pidgey", [40, 45, 40, 56, 35], Normal, Flying),
    two("Pidgeotto", [63, 60, 55, 71, 50], Normal, Flying),
    two("Pidgeot", [83, 80, 75, 91, 70], Normal, Flying),
    one("Rattata", [30, 56, 35, 72, 25], Normal),
    one("Raticate", [55, 81, 60, 97, 50], Normal),
    two("Spearow", [40, 60, 30, 70, 31], Normal, Flying),
    two("Fearow", [65, 90, 65, 100, 61], Normal, Flying),
    one("Ekans", [35, 60, 44, 55, 40], Poison),
    one("Arbok", [60, 85, 69, 80, 65], Poison),
    one("Pikachu", [35, 55, 30, 90, 50], Electric),
    one("Raichu", [60, 90, 55, 100, 90], Electric),
    one("Sandshrew", [50, 75, 85, 40, 30], Ground),
    one("Sandslash", [75, 100, 110, 65, 55], Ground),
    one("Nidoran-F", [55, 47, 52, 41, 40], Poison),
    one("Nidorina", [70, 62, 67, 56, 55], Poison),
    two("Nidoqueen", [90, 82, 87, 76, 75], Poison, Ground),
    one("Nidoran-M", [46, 57, 40, 50, 40], Poison),
    one("Nidorino", [61, 72, 57, 65, 55], Poison),
    two("Nidoking", [81, 92, 77, 85, 75], Poison, Ground),
    one("Clefairy", [70, 45, 48, 35, 60], Normal),
    one("Clefable", [95, 70, 73, 60, 85], Normal),
    one("Vulpix", [38, 41, 40, 65, 65], Fire),
    one("Ninetales", [73, 76, 75, 100, 100], Fire),
    one("Jigglypuff", [115, 45, 20, 20, 25], Normal),
    one("Wigglytuff", [140, 70, 45, 45, 50], Normal),
    two("Zubat", [40, 45, 35, 55, 40], Poison, Flying),
    two("Golbat", [75, 80, 70, 90, 75], Poison, Flying),
    two("Oddish", [45, 50, 55, 30, 75], Grass, Poison),
    two("Gloom", [60, 65, 70, 40, 85], Grass, Poison),
    two("Vileplume", [75, 80, 85, 50, 100], Grass, Poison),
    two("Paras", [35, 70, 55, 25, 55], Bug, Grass),
    two("Parasect", [60, 95, 80, 30, 80], Bug, Grass),
    two("Venonat", [60, 55, 50, 45, 40], Bug, Poison),
    two("Venomoth", [70, 65, 60, 90, 90], Bug, Poison),
    one("Diglett", [10, 55, 25, 95, 45], Ground),
    one("Dugtrio", [35, 80, 50, 120, 70], Ground),
    one("Meowth", [40, 45, 35, 90, 40], Normal),
    one("Persian", [65, 70, 60, 115, 65], Normal),
    one("Psyduck", [50, 52, 48, 55, 50], Water),
    one("Golduck", [80, 82, 78, 85, 80], Water),
    one("Mankey", [40, 80, 35, 70, 35], Fighting),
    one("Primeape", [65, 105, 60, 95, 60], Fighting),
    one("Growlithe", [55, 70, 45, 60, 50], Fire),
    one("Arcanine", [90, 110, 80, 95, 80], Fire),
    one("Poliwag", [40, 50, 40, 90, 40], Water),
    one("Poliwhirl", [65, 65, 65, 90, 50], Water),
    two("Poliwrath", [90, 85, 95, 70, 70], Water, Fighting),
    one("Abra", [25, 20, 15, 90, 105], Psychic),
    one("Kadabra", [40, 35, 30, 105, 120], Psychic),
    one("Alakazam", [55, 50, 45, 120, 135], Psychic),
    one("Machop", [70, 80, 50, 35, 35], Fighting),
    one("Machoke", [80, 100, 70, 45, 50], Fighting),
    one("Machamp", [90, 130, 80, 55, 65], Fighting),
    two("Bellsprout", [50, 75, 35, 40, 70], Grass, Poison),
    two("Weepinbell", [65, 90, 50, 55, 85], Grass, Poison),
    two("Victreebel", [80, 105, 65, 70, 100], Grass, Poison),
    two("Tentacool", [40, 40, 35, 70, 100], Water, Poison),
    two("Tentacruel", [80, 70, 65, 100, 120], Water, Poison),
    two("Geodude", [40, 80, 100, 20, 30], Rock, Ground),
    two("Graveler", [55, 95, 115, 35, 45], Rock, Ground),
    two("Golem", [80, 110, 130, 45, 55], Rock, Ground),
    one("Ponyta", [50, 85, 55, 90, 65], Fire),
    one("Rapidash", [65, 100, 70, 105, 80], Fire),
    two("Slowpoke", [90, 65, 65, 15, 40], Water, Psychic),
    two("Slowbro", [95, 75, 110, 30, 80], Water, Psychic),
    one("Magnemite", [25, 35, 70, 45, 95], Electric),
    one("Magneton", [50, 60, 95, 70, 120], Electric),
    two("Farfetch'd", [52, 65, 55, 60, 58], Normal, Flying),
    two("Doduo", [35, 85, 45, 75, 35], Normal, Flying),
    two("Dodrio", [60, 110, 70, 100, 60], Normal, Flying),
    one("Seel", [65, 45, 55, 45, 70], Water),
    two("Dewgong", [90, 70, 80, 70, 95], Water, Ice),
    one("Grimer", [80, 80, 50, 25, 40], Poison),
    one("Muk", [105, 105, 75, 50, 65], Poison),
    one("Shellder", [30, 65, 100, 40, 45], Water),
    two("Cloyster", [50, 95, 180, 70, 85], Water, Ice),
    two("Gastly", [30, 35, 30, 80, 100], Ghost, Poison),
    two("Haunter", [45, 50, 45, 95, 115], Ghost, Poison),
    two("Gengar", [60, 65, 60, 110, 130], Ghost, Poison),
    two("Onix", [35, 45, 160, 70, 30], Rock, Ground),
    one("Drowzee", [60, 48, 45, 42, 90], Psychic),
    one("Hypno", [85, 73, 70, 67, 115], Psychic),
    one("Krabby", [30, 105, 90, 50, 25], Water),
    one("Kingler", [55, 130, 115, 75, 50], Water),
    one("Voltorb", [40, 30, 50, 100, 55], Electric),
    one("Electrode", [60, 50, 70, 140, 80], Electric),
    two("Exeggcute", [60, 40, 80, 40, 60], Grass, Psychic),
    two("Exeggutor", [95, 95, 85, 55, 125], Grass, Psychic),
    one("Cubone", [50, 50, 95, 35, 40], Ground),
    one("Marowak", [60, 80, 110, 45, 50], Ground),
    one("Hitmonlee", [50, 120, 53, 87, 35], Fighting),
    one("Hitmonchan", [50, 105, 79, 76, 35], Fighting),
    one("Lickitung", [90, 55, 75, 30, 60], Normal),
    one("Koffing", [40, 65, 95, 35, 60], Poison),
    one("Weezing", [65, 90, 120, 60, 85], Poison),
    two("Rhyhorn", [80, 85, 95, 25, 30], Ground, Rock),
    two("Rhydon", [105, 130, 120, 40, 45], Ground, Rock),
    one("Chansey", [250, 5, 5, 50, 105], Normal),
    one("Tangela", [65, 55, 115, 60, 100], Grass),
    one("Kangaskhan", [105, 95, 80, 90, 40], Normal),
    one("Horsea", [30, 40, 70, 60, 70], Water),
    one("Seadra", [55, 65, 95, 85, 95], Water),
    one("Goldeen", [45, 67, 60, 63, 50], Water),
    one("Seaking", [80, 92, 65, 68, 80], Water),
    one("Staryu", [30, 45, 55, 85, 70], Water),
    two("Starmie", [60, 75, 85, 115, 100], Water, Psychic),
    one("Mr. Mime", [40, 45, 65, 90, 100], Psychic),
    two("Scyther", [70, 110, 80, 105, 55], Bug, Flying),
    two("Jynx", [65, 50, 35, 95, 95], Ice, Psychic),
    one("Electabuzz", [65, 83, 57, 105, 85], Electric),
    one("Magmar", [65, 95, 57, 93, 85], Fire),
    one("Pinsir", [65, 125, 100, 85, 55], Bug),
    one("Tauros", [75, 100, 95, 110, 70], Normal),
    one("Magikarp", [20, 10, 55, 80, 20], Water),
    two("Gyarados", [95, 125, 79, 81, 100], Water, Flying),
    two("Lapras", [130, 85, 80, 60, 95], Water, Ice),
    one("Ditto", [48, 48, 48, 48, 48], Normal),
    one("Eevee", [55, 55, 50, 55, 65], Normal),
    one("Vaporeon", [130, 65, 60, 65, 110], Water),
    one("Jolteon", [65, 65, 60, 130, 110], Electric),
    one("Flareon", [65, 130, 60, 65, 110], Fire),
    one("Porygon", [65, 60, 70, 40, 75], Normal),
    two("Omanyte", [35, 40, 100, 35, 90], Rock, Water),
    two("Omastar", [70, 60, 125, 55, 115], Rock, Water),
    two("Kabuto", [30, 80, 90, 55, 45], Rock, Water),
    two("Kabutops", [60, 115, 105, 80, 70], Rock, Water),
    two("Aerodactyl", [80, 105, 65, 130, 60], Rock, Flying),
    one("Snorlax", [160, 110, 65, 30, 65], Normal),
    two("Articuno", [90, 85, 100, 85, 125], Ice, Flying),
    two("Zapdos", [90, 90, 85, 100, 125], Electric, Flying),
    two("Moltres", [90, 100, 90, 90, 125], Fire, Flying),
    one("Dratini", [41, 64, 45, 50, 50], Dragon),
    one("Dragonair", [61, 84, 65, 70, 70], Dragon),
    two("Dragonite", [91, 134, 95, 80, 100], Dragon, Flying),
    one("Mewtwo", [106, 110, 90, 130, 154], Psychic),
    one("Mew", [100, 100, 100, 100, 100], Psychic),
];

pub static MOVES: &[Move] = &[
    Move::new("Pound", 35),
    Move::new("Karate Chop", 25),
    Move::new("Double Slap", 10),
    Move::new("Comet Punch", 15),
    Move::new("Mega Punch", 20),
    Move::new("Pay Day", 20),
    Move::new("Fire Punch", 15),
    Move::new("Ice Punch", 15),
    Move::new("Thunder Punch", 15),
    Move::new("Scratch", 35),
    Move::new("Vise Grip", 30),
    Move::new("Guillotine", 5),
    Move::new("Razor Wind", 10),
    Move::new("Swords Dance", 30),
    Move::new("Cut", 30),
    Move::new("Gust", 35),
    Move::new("Wing Attack", 35),
    Move::new("Whirlwind", 20),
    Move::new("Fly", 15),
    Move::new("Bind", 20),
    Move::new("Slam", 20),
    Move::new("Vine Whip", 10),
    Move::new("Stomp", 20),
    Move::new("Double Kick", 30),
    Move::new("Mega Kick", 5),
    Move::new("Jump Kick", 25),
    Move::new("Rolling Kick", 15),
    Move::new("Sand Attack", 15),
    Move::new("Headbutt", 15),
    Move::new("Horn Attack", 25),
    Move::new("Fury Attack", 20),
    Move::new("Horn Drill", 5),
    Move::new("Tackle", 35),
    Move::new("Body Slam", 15),
    Move::new("Wrap", 20),
    Move::new("Take Down", 20),
    Move::new("Thrash", 20),
    Move::new("Double-Edge", 15),
    Move::new("Tail Whip", 30),
    Move::new("Poison Sting", 35),
    Move::new("Twineedle", 20),
    Move::new("Pin Missile", 20),
    Move::new("Leer", 30),
    Move::new("Bite", 25),
    Move::new("Growl", 40),
    Move::new("Roar", 20),
    Move::new("Sing", 15),
    Move::new("Supersonic", 20),
    Move::new("Sonic Boom", 20),
    Move::new("Disable", 20),
    Move::new("Acid", 30),
    Move::new("Ember", 25),
    Move::new("Flamethrower", 15),
    Move::new("Mist", 30),
    Move::new("Water Gun", 25),
    Move::new("Hydro Pump", 5),
    Move::new("Surf", 15),
    Move::new("Ice Beam", 10),
    Move::new("Blizzard", 5),
    Move::new("Psybeam", 20),
    Move::new("Bubble Beam", 20),
    Move::new("Aurora Beam", 20),
    Move::new("Hyper Beam", 5),
    Move::new("Peck", 35),
    Move::new("Drill Peck", 20),
    Move::new("Submission", 25),
    Move::new("Low Kick", 20),
    Move::new("Counter", 20),
    Move::new("Seismic Toss", 20),
    Move::new("Strength", 15),
    Move::new("Absorb", 20),
    Move::new("Mega Drain", 10),
    Move::new("Leech Seed", 10),
    Move::new("Growth", 40),
    Move::new("Razor Leaf", 25),
    Move::new("Solar Beam", 10),
    Move::new("Poison Powder", 35),
    Move::new("Stun Spore", 30),
    Move::new("Sleep Powder", 15),
    Move::new("Petal Dance", 20),
    Move::new("String Shot", 40),
    Move::new("Dragon Rage", 10),
    Move::new("Fire Spin", 15),
    Move::new("Thunder Shock", 30),
    Move::new("Thunderbolt", 15),
    Move::new("Thunder Wave", 20),
    Move::new("Thunder", 10),
    Move::new("Rock Throw", 15),
    Move::new("Earthquake", 10),
    Move::new("Fissure", 5),
    Move::new("Dig", 10),
    Move::new("Toxic", 10),
    Move::new("Confusion", 25),
    Move::new("Psychic", 10),
    Move::new("Hypnosis", 20),
    Move::new("Meditate", 40),
    Move::new("Agility", 30),
    Move::new("Quick Attack", 30),
    Move::new("Rage", 20),
    Move::new("Teleport", 20),
    Move::new("Night Shade", 15),
    Move::new("Mimic", 10),
    Move::new("Screech", 40),
    Move::new("Double Team", 15),
    Move::new("Recover", 20),
    Move::new("Harden", 30),
    Move::new("Minimize", 20),
    Move::new("Smokescreen", 20),
    Move::new("Confuse Ray", 10),
    Move::new("Withdraw", 40),
    Move::new("Defense Curl", 40),
    Move::new("Barrier", 30),
    Move::new("Light Screen", 30),
    Move::new("Haze", 30),
    Move::new("Reflect", 20),
    Move::new("Focus Energy", 30),
    Move::new("Bide", 10),
    Move::new("Metronome", 10),
    Move::new("Mirror Move", 20),
    Move::new("Self-Destruct", 5),
    Move::new("Egg Bomb", 10),
    Move::new("Lick", 30),
    Move::new("Smog", 20),
    Move::new("Sludge", 20),
    Move::new("Bone Club", 20),
    Move::new("Fire Blast", 5),
    Move::new("Waterfall", 15),
    Move::new("Clamp", 10),
    Move::new("Swift", 20),
    Move::new("Skull Bash", 15),
    Move::new("Spike Cannon", 15),
    Move::new("Constrict", 35),
    Move::new("Amnesia", 20),
    Move::new("Kinesis", 15),
    Move::new("Soft-Boiled", 10),
    Move::new("High Jump Kick", 20),
    Move::new("Glare", 30),
    Move::new("Dream Eater", 15),
    Move::new("Poison Gas", 40),
    Move::new("Barrage", 20),
    Move::new("Leech Life", 15),
    Move::new("Lovely Kiss", 10),
    Move::new("Sky Attack", 5),
    Move::new("Transform", 10),
    Move::new("Bubble", 30),
    Move::new("Dizzy Punch", 10),
    Move::new("Spore", 15),
    Move::new("Flash", 20),
    Move::new("Psywave", 15),
    Move::new("Splash", 40),
    Move::new("Acid Armor", 40),
    Move::new("Crabhammer", 10),
    Move::new("Explosion", 5),
    Move::new("Fury Swipes", 15),
    Move::new("Bonemerang", 10),
    Move::new("Rest", 10),
    Move::new("Rock Slide", 10),
    Move::new("Hyper Fang", 15),
    Move::new("Sharpen", 30),
    Move::new("Conversion", 30),
    Move::new("Tri Attack", 10),
    Move::new("Super Fang", 10),
    Move::new("Slash", 20),
    Move::new("Substitute", 10),
    Move::new("Struggle", 10),
];
