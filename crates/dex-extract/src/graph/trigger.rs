//! Evolution trigger classification.

use crate::model::{TriggerDescriptor, TriggerKind, TriggerParams};

/// Classifies the trigger leading into a record from its own parameters.
///
/// Friendship wins over everything else, then a traded held item, then an
/// item use, then a learned move. Any other record carrying a level is a
/// level-up, whatever extra condition its evo type names. The rest (plain
/// trades, held-item evolutions without a level) is [`TriggerKind::Other`]
/// and callers format it from the raw parameters.
pub fn classify(params: &TriggerParams) -> TriggerKind {
    match params.evo_type.as_deref() {
        Some("levelFriendship") => TriggerKind::Friendship,
        Some("trade") if params.item.is_some() => TriggerKind::TradeHeld,
        Some("useItem") => TriggerKind::UseItem,
        Some("levelMove") => TriggerKind::MoveLearned,
        _ if params.level.is_some() => TriggerKind::LevelUp,
        _ => TriggerKind::Other,
    }
}

impl TriggerDescriptor {
    /// Classifies `params` and keeps them alongside the result.
    pub fn from_params(params: TriggerParams) -> Self {
        Self {
            kind: classify(&params),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(evo_type: Option<&str>, level: Option<i64>, item: Option<&str>) -> TriggerParams {
        TriggerParams {
            level,
            evo_type: evo_type.map(str::to_string),
            item: item.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&params(None, Some(16), None)), TriggerKind::LevelUp);
        assert_eq!(
            classify(&params(Some("useItem"), None, Some("Fire Stone"))),
            TriggerKind::UseItem
        );
        assert_eq!(
            classify(&params(Some("trade"), None, Some("Metal Coat"))),
            TriggerKind::TradeHeld
        );
        assert_eq!(classify(&params(Some("levelFriendship"), None, None)), TriggerKind::Friendship);
        assert_eq!(classify(&params(Some("levelMove"), None, None)), TriggerKind::MoveLearned);
    }

    #[test]
    fn test_classify_other() {
        // plain trade, held-item level-up, and a record with no parameters
        assert_eq!(classify(&params(Some("trade"), None, None)), TriggerKind::Other);
        assert_eq!(
            classify(&params(Some("levelHold"), None, Some("Oval Stone"))),
            TriggerKind::Other
        );
        assert_eq!(classify(&TriggerParams::default()), TriggerKind::Other);
    }

    #[test]
    fn test_level_with_extra_condition_is_level_up() {
        assert_eq!(classify(&params(Some("levelExtra"), Some(50), None)), TriggerKind::LevelUp);
        assert_eq!(
            classify(&params(Some("levelHold"), Some(20), Some("Razor Claw"))),
            TriggerKind::LevelUp
        );
        // a traded held item still wins over a level
        assert_eq!(
            classify(&params(Some("trade"), Some(30), Some("Metal Coat"))),
            TriggerKind::TradeHeld
        );
    }

    #[test]
    fn test_friendship_wins_over_level() {
        assert_eq!(
            classify(&params(Some("levelFriendship"), Some(20), None)),
            TriggerKind::Friendship
        );
    }

    #[test]
    fn test_descriptor_keeps_params() {
        let descriptor = TriggerDescriptor::from_params(params(None, Some(32), None));
        assert_eq!(descriptor.kind, TriggerKind::LevelUp);
        assert_eq!(descriptor.params.level, Some(32));
    }
}
