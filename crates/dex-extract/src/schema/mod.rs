//! Field tables for the record types the corpus holds.
//!
//! Each table is built once and shared; pass it to [`crate::decode`]
//! together with a located span.

use lazy_static::lazy_static;

use crate::model::{FieldKind, FieldSpec};

/// Field names, identical to the keys they are read from.
pub mod fields {
    pub const NUM: &str = "num";
    pub const NAME: &str = "name";
    pub const TYPES: &str = "types";
    pub const BASE_STATS: &str = "baseStats";
    pub const ABILITIES: &str = "abilities";
    pub const HEIGHT: &str = "heightm";
    pub const WEIGHT: &str = "weightkg";
    pub const GENDER_RATIO: &str = "genderRatio";
    pub const EVOS: &str = "evos";
    pub const PREVO: &str = "prevo";
    pub const EVO_LEVEL: &str = "evoLevel";
    pub const EVO_TYPE: &str = "evoType";
    pub const EVO_ITEM: &str = "evoItem";
    pub const EVO_MOVE: &str = "evoMove";
    pub const EVO_CONDITION: &str = "evoCondition";
    pub const OTHER_FORMES: &str = "otherFormes";

    pub const ACCURACY: &str = "accuracy";
    pub const BASE_POWER: &str = "basePower";
    pub const CATEGORY: &str = "category";
    pub const MOVE_TYPE: &str = "type";
    pub const PP: &str = "pp";
    pub const PRIORITY: &str = "priority";
    pub const DESC: &str = "desc";
    pub const SHORT_DESC: &str = "shortDesc";

    pub const LEARNSET: &str = "learnset";
}

use fields::*;

lazy_static! {
    static ref SPECIES: Vec<FieldSpec> = vec![
        FieldSpec::new(NUM, FieldKind::Integer),
        FieldSpec::new(NAME, FieldKind::QuotedString),
        FieldSpec::new(TYPES, FieldKind::StringArray),
        FieldSpec::new(BASE_STATS, FieldKind::StringMap),
        FieldSpec::new(ABILITIES, FieldKind::StringMap),
        FieldSpec::new(HEIGHT, FieldKind::Float),
        FieldSpec::new(WEIGHT, FieldKind::Float),
        FieldSpec::new(GENDER_RATIO, FieldKind::StringMap),
        FieldSpec::new(EVOS, FieldKind::StringArray),
        FieldSpec::new(PREVO, FieldKind::QuotedString),
        FieldSpec::new(EVO_LEVEL, FieldKind::Integer),
        FieldSpec::new(EVO_TYPE, FieldKind::QuotedString),
        FieldSpec::new(EVO_ITEM, FieldKind::QuotedString),
        FieldSpec::new(EVO_MOVE, FieldKind::QuotedString),
        FieldSpec::new(EVO_CONDITION, FieldKind::QuotedString),
        FieldSpec::new(OTHER_FORMES, FieldKind::StringArray),
    ];

    static ref EVOLUTION: Vec<FieldSpec> = vec![
        FieldSpec::new(NAME, FieldKind::QuotedString),
        FieldSpec::new(EVOS, FieldKind::StringArray),
        FieldSpec::new(EVO_LEVEL, FieldKind::Integer),
        FieldSpec::new(EVO_TYPE, FieldKind::QuotedString),
        FieldSpec::new(EVO_ITEM, FieldKind::QuotedString),
        FieldSpec::new(EVO_MOVE, FieldKind::QuotedString),
        FieldSpec::new(EVO_CONDITION, FieldKind::QuotedString),
    ];

    static ref FORWARD_EDGES: Vec<FieldSpec> = vec![FieldSpec::new(EVOS, FieldKind::StringArray)];

    static ref NUMBER: Vec<FieldSpec> = vec![FieldSpec::new(NUM, FieldKind::Integer)];

    static ref MOVES: Vec<FieldSpec> = vec![
        FieldSpec::new(NUM, FieldKind::Integer),
        FieldSpec::new(NAME, FieldKind::QuotedString),
        FieldSpec::new(ACCURACY, FieldKind::IntegerOrBoolean),
        FieldSpec::new(BASE_POWER, FieldKind::Integer),
        FieldSpec::new(CATEGORY, FieldKind::QuotedString),
        FieldSpec::new(MOVE_TYPE, FieldKind::QuotedString),
        FieldSpec::new(PP, FieldKind::Integer),
        FieldSpec::new(PRIORITY, FieldKind::Integer),
        FieldSpec::new(DESC, FieldKind::QuotedString),
        FieldSpec::new(SHORT_DESC, FieldKind::QuotedString),
    ];

    static ref LEARNSETS: Vec<FieldSpec> = vec![FieldSpec::new(LEARNSET, FieldKind::ArrayMap)];
}

/// Every field a species record carries.
pub fn species_fields() -> &'static [FieldSpec] {
    &SPECIES
}

/// The fields the graph builder reads: name, forward edges and trigger parameters.
pub fn evolution_fields() -> &'static [FieldSpec] {
    &EVOLUTION
}

/// Forward edges only.
pub fn forward_edge_fields() -> &'static [FieldSpec] {
    &FORWARD_EDGES
}

/// The national number only.
pub fn number_fields() -> &'static [FieldSpec] {
    &NUMBER
}

/// Every field a move record carries.
pub fn move_fields() -> &'static [FieldSpec] {
    &MOVES
}

/// The learnset block of a learnsets record.
pub fn learnset_fields() -> &'static [FieldSpec] {
    &LEARNSETS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, locate};
    use crate::model::{Learnset, Move, Species};

    const VENUSAUR: &str = r#"venusaur:{num:3,name:"Venusaur",types:["Grass","Poison"],genderRatio:{M:0.875,F:0.125},baseStats:{hp:80,atk:82,def:83,spa:100,spd:100,spe:80},abilities:{0:"Overgrow",H:"Chlorophyll"},heightm:2,weightkg:100,color:"Green",prevo:"Ivysaur",evoLevel:32,otherFormes:["Venusaur-Mega","Venusaur-Gmax"],formeOrder:["Venusaur","Venusaur-Mega","Venusaur-Gmax"],eggGroups:["Monster","Grass"]},"#;

    #[test]
    fn test_species_table_decodes_full_record() {
        let span = locate(VENUSAUR, "venusaur").unwrap();
        let record = decode(&span, species_fields());
        let species = Species::from_record(span.key.clone(), &record);

        assert_eq!(species.id, Some(3));
        assert_eq!(species.name, "Venusaur");
        assert_eq!(species.type1.as_deref(), Some("Grass"));
        assert_eq!(species.type2.as_deref(), Some("Poison"));
        assert_eq!(species.total, 525);
        assert_eq!(species.abilities, vec!["Overgrow", "Chlorophyll"]);
        assert_eq!(species.height, Some(2.0));
        assert_eq!(species.weight, Some(100.0));
        assert_eq!(species.gender_ratio.get("M"), Some(&0.875));
        assert_eq!(species.prevo.as_deref(), Some("Ivysaur"));
        assert_eq!(species.evo_level, Some(32));
        assert!(species.evos.is_empty());
        assert_eq!(species.other_formes, vec!["Venusaur-Mega", "Venusaur-Gmax"]);
    }

    #[test]
    fn test_move_table() {
        let text = r#"swift:{num:129,accuracy:true,basePower:60,category:"Special",name:"Swift",pp:20,priority:0,flags:{protect:1,mirror:1},target:"allAdjacentFoes",type:"Normal",desc:"This move does not check accuracy.",shortDesc:"This move does not check accuracy."},"#;
        let span = locate(text, "swift").unwrap();
        let mv = Move::from_record(span.key.clone(), &decode(&span, move_fields()));

        assert_eq!(mv.id, Some(129));
        assert_eq!(mv.name, "Swift");
        assert_eq!(mv.accuracy, Some(crate::model::Accuracy::Always));
        assert_eq!(mv.base_power, Some(60));
        assert_eq!(mv.category.as_deref(), Some("Special"));
        assert_eq!(mv.move_type.as_deref(), Some("Normal"));
        assert_eq!(mv.pp, Some(20));
        assert_eq!(mv.priority, Some(0));
        assert_eq!(mv.short_desc.as_deref(), Some("This move does not check accuracy."));
    }

    #[test]
    fn test_learnset_table() {
        let text = r#"bulbasaur:{learnset:{growl:["9L3","8L3"],toxic:["8M"]},eventData:[{generation:3,level:70}]},"#;
        let span = locate(text, "bulbasaur").unwrap();
        let learnset = Learnset::from_record(span.key.clone(), &decode(&span, learnset_fields()));
        assert_eq!(learnset.moves.len(), 2);
        assert_eq!(learnset.categorize().machine, vec!["toxic"]);
    }
}
