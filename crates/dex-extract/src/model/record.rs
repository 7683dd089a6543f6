//! Typed projections of decoded records.
//!
//! These are what the persistence and HTTP layers consume. Projection never
//! fails: missing fields become `None`, zero or empty collections.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::model::{DecodedRecord, EntityKey};
use crate::schema::fields;

lazy_static! {
    // Level-up learn methods: `<generation>L<level>`
    static ref LEVEL_UP_METHOD: Regex = Regex::new(r"^\d+L\d+").unwrap();
}

/// The six base stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_atk: u32,
    pub sp_def: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Reads stats from a `baseStats` map (`hp`, `atk`, `def`, `spa`, `spd`, `spe`).
    ///
    /// Unknown keys are ignored and unparsable values count as zero.
    pub fn from_map(map: &IndexMap<String, String>) -> Self {
        let stat = |key: &str| {
            map.get(key)
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0)
        };
        Self {
            hp: stat("hp"),
            attack: stat("atk"),
            defense: stat("def"),
            sp_atk: stat("spa"),
            sp_def: stat("spd"),
            speed: stat("spe"),
        }
    }

    /// Returns the sum of the six stats, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        [self.attack, self.defense, self.sp_atk, self.sp_def, self.speed]
            .into_iter()
            .fold(self.hp, u32::saturating_add)
    }
}

/// One species record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub key: EntityKey,
    pub id: Option<i64>,
    pub name: String,
    pub type1: Option<String>,
    pub type2: Option<String>,
    /// Number of types the record declared (normally 1 or 2).
    pub type_count: usize,
    /// `None` when the record had no `baseStats` block.
    pub stats: Option<BaseStats>,
    /// Stat total as the caller will persist it.
    pub total: u32,
    /// Ability names in slot order (`0`, `1`, `H`, `S`).
    pub abilities: Vec<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    /// Gender ratios keyed `M` / `F`; empty when not declared.
    pub gender_ratio: IndexMap<String, f64>,
    pub evos: Vec<String>,
    pub prevo: Option<String>,
    pub evo_level: Option<i64>,
    pub evo_type: Option<String>,
    pub evo_item: Option<String>,
    pub other_formes: Vec<String>,
}

impl Species {
    /// Projects a record decoded with [`crate::schema::species_fields`].
    pub fn from_record(key: impl Into<EntityKey>, record: &DecodedRecord) -> Self {
        let key = key.into();
        let types = record.list(fields::TYPES).unwrap_or_default();
        let stats = record.map(fields::BASE_STATS).map(BaseStats::from_map);
        let gender_ratio = record
            .map(fields::GENDER_RATIO)
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.parse::<f64>().ok().map(|r| (k.clone(), r)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: record.integer(fields::NUM),
            name: record.text(fields::NAME).unwrap_or(&key).to_string(),
            type1: types.first().cloned(),
            type2: types.get(1).cloned(),
            type_count: types.len(),
            total: stats.map(|s| s.total()).unwrap_or(0),
            stats,
            abilities: record
                .map(fields::ABILITIES)
                .map(|m| m.values().filter(|v| !v.is_empty()).cloned().collect())
                .unwrap_or_default(),
            height: record.float(fields::HEIGHT),
            weight: record.float(fields::WEIGHT),
            gender_ratio,
            evos: record.list(fields::EVOS).map(<[String]>::to_vec).unwrap_or_default(),
            prevo: record.text(fields::PREVO).map(str::to_string),
            evo_level: record.integer(fields::EVO_LEVEL),
            evo_type: record.text(fields::EVO_TYPE).map(str::to_string),
            evo_item: record.text(fields::EVO_ITEM).map(str::to_string),
            other_formes: record
                .list(fields::OTHER_FORMES)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            key,
        }
    }
}

/// Move accuracy: either a percentage or "never misses".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accuracy {
    Always,
    Percent(i64),
}

impl Serialize for Accuracy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Accuracy::Always => serializer.serialize_bool(true),
            Accuracy::Percent(p) => serializer.serialize_i64(*p),
        }
    }
}

/// One move record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Move {
    pub key: EntityKey,
    pub id: Option<i64>,
    pub name: String,
    pub accuracy: Option<Accuracy>,
    pub base_power: Option<i64>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub move_type: Option<String>,
    pub pp: Option<i64>,
    pub priority: Option<i64>,
    pub desc: Option<String>,
    pub short_desc: Option<String>,
}

impl Move {
    /// Projects a record decoded with [`crate::schema::move_fields`].
    pub fn from_record(key: impl Into<EntityKey>, record: &DecodedRecord) -> Self {
        let key = key.into();
        let accuracy = match record.get(fields::ACCURACY) {
            Some(v) if v.as_bool() == Some(true) => Some(Accuracy::Always),
            Some(v) => v.as_i64().map(Accuracy::Percent),
            None => None,
        };
        Self {
            id: record.integer(fields::NUM),
            name: record.text(fields::NAME).unwrap_or(&key).to_string(),
            accuracy,
            base_power: record.integer(fields::BASE_POWER),
            category: record.text(fields::CATEGORY).map(str::to_string),
            move_type: record.text(fields::MOVE_TYPE).map(str::to_string),
            pp: record.integer(fields::PP),
            priority: record.integer(fields::PRIORITY),
            desc: record.text(fields::DESC).map(str::to_string),
            short_desc: record.text(fields::SHORT_DESC).map(str::to_string),
            key,
        }
    }
}

/// Moves grouped by how they are learned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LearnMethods {
    pub level_up: Vec<String>,
    pub egg: Vec<String>,
    pub machine: Vec<String>,
    pub tutor: Vec<String>,
}

/// One species' learnset: move id to learn-method codes (`8L15`, `7E`, `8M`, `8T`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Learnset {
    pub key: EntityKey,
    pub moves: IndexMap<String, Vec<String>>,
}

impl Learnset {
    /// Projects a record decoded with [`crate::schema::learnset_fields`].
    pub fn from_record(key: impl Into<EntityKey>, record: &DecodedRecord) -> Self {
        Self {
            key: key.into(),
            moves: record.list_map(fields::LEARNSET).cloned().unwrap_or_default(),
        }
    }

    /// Groups moves by learn method, in learnset order without duplicates.
    ///
    /// A method ending in `E` is an egg move, ending in `T` a tutor move,
    /// containing `M` a machine move, and `<gen>L<level>` a level-up move.
    /// Other codes (events, virtual console transfers) are ignored. A move
    /// learned several ways appears in each matching group once.
    pub fn categorize(&self) -> LearnMethods {
        let mut groups = LearnMethods::default();
        for (move_id, methods) in &self.moves {
            for method in methods {
                let group = if method.ends_with('E') {
                    &mut groups.egg
                } else if method.ends_with('T') {
                    &mut groups.tutor
                } else if method.contains('M') {
                    &mut groups.machine
                } else if LEVEL_UP_METHOD.is_match(method) {
                    &mut groups.level_up
                } else {
                    continue;
                };
                if !group.contains(move_id) {
                    group.push(move_id.clone());
                }
            }
        }
        groups
    }
}
