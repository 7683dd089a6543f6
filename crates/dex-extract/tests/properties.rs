//! Property tests for the scanner, decoder and resolver.

use dex_extract::{
    EvolutionContext, ExtractError, FieldKind, FieldSpec, KeyFilter, SourceAccess, SuffixSet,
    canonicalize, decode, list_entity_keys, locate,
};
use proptest::prelude::*;

/// Balanced object text: nested maps of bare-word keys and small values.
fn balanced_object() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        "[a-z]{0,8}".prop_map(|s| format!("\"{s}\"")),
        prop::collection::vec("[a-z]{1,5}", 0..4)
            .prop_map(|items| format!("[{}]", items.iter().map(|s| format!("\"{s}\"")).collect::<Vec<_>>().join(","))),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|fields| {
            let body: Vec<String> = fields.into_iter().map(|(k, v)| format!("{k}: {v}")).collect();
            format!("{{{}}}", body.join(", "))
        })
    })
    .prop_map(|value| {
        if value.starts_with('{') {
            value
        } else {
            format!("{{inner: {value}}}")
        }
    })
}

fn depth_profile(text: &str) -> (i64, i64) {
    let mut depth = 0i64;
    let mut min = 0i64;
    for b in text.bytes() {
        match b {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        min = min.min(depth);
    }
    (depth, min)
}

proptest! {
    #[test]
    fn located_span_is_balanced(record in balanced_object(), prefix in "[a-z]{1,6}") {
        let source = format!("exports.Data = {{{prefix}x: {{}}, target: {record}, after: {{}}}};");
        let span = locate(&source, "target").unwrap();

        prop_assert_eq!(span.text.as_bytes().first(), Some(&b'{'));
        prop_assert_eq!(span.text.as_bytes().last(), Some(&b'}'));
        prop_assert_eq!(span.text, record.as_str());
        prop_assert_eq!(depth_profile(span.text), (0, 0));
    }

    #[test]
    fn unclosed_record_is_reported(record in balanced_object()) {
        // drop the closing brace
        let truncated = &record[..record.len() - 1];
        let source = format!("target: {truncated}");
        prop_assert!(
            matches!(
                locate(&source, "target"),
                Err(ExtractError::UnbalancedDelimiters { depth, .. }) if depth >= 1
            ),
            "unclosed record was not reported as unbalanced"
        );
    }

    #[test]
    fn absent_key_is_not_found(record in balanced_object()) {
        let source = format!("present: {record}");
        prop_assert!(
            matches!(locate(&source, "absent_key"), Err(ExtractError::NotFound { .. })),
            "absent key was not reported as not found"
        );
    }

    #[test]
    fn keys_stop_at_record_level(records in prop::collection::vec(balanced_object(), 1..6)) {
        let body: Vec<String> = records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("rec{i}: {record}"))
            .collect();
        let source = format!("exports.Data = {{{}}};", body.join(",\n"));
        let keys = list_entity_keys(&source, &KeyFilter::permissive());

        let expected: Vec<String> = (0..records.len()).map(|i| format!("rec{i}")).collect();
        prop_assert_eq!(keys.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn decode_is_idempotent(
        num in -5000i64..5000,
        name in "[A-Za-z' .-]{0,20}",
        types in prop::collection::vec("[A-Z][a-z]{2,8}", 0..3),
    ) {
        let types = types.iter().map(|t| format!("'{t}'")).collect::<Vec<_>>().join(", ");
        let source = format!(
            r#"target: {{num: {num}, name: "{name}", types: [{types}], stats: {{hp: {num}}}}}"#
        );
        let specs = [
            FieldSpec::new("num", FieldKind::Integer),
            FieldSpec::new("name", FieldKind::QuotedString),
            FieldSpec::new("types", FieldKind::StringArray),
            FieldSpec::new("stats", FieldKind::StringMap),
        ];
        let span = locate(&source, "target").unwrap();
        let first = decode(&span, &specs);
        let second = decode(&span, &specs);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.integer("num"), Some(num));
        prop_assert_eq!(first.text("name"), Some(name.as_str()));
    }

    #[test]
    fn canonical_names_cover_every_id(ids in prop::collection::vec("[a-z]{1,10}", 0..30)) {
        let names = canonicalize(&ids, &SuffixSet::default());
        for id in &ids {
            let name = &names[id.as_str()];
            prop_assert!(name.value.starts_with(name.base.as_str()));
            if !name.is_variant() {
                prop_assert_eq!(&name.value, id);
            }
        }
    }

    #[test]
    fn traversal_terminates_on_arbitrary_edges(
        edges in prop::collection::vec((0usize..6, 0usize..6), 0..15),
        start in 0usize..6,
    ) {
        let mut source = String::new();
        for node in 0..6 {
            let evos: Vec<String> = edges
                .iter()
                .filter(|(from, _)| *from == node)
                .map(|(_, to)| format!("\"n{to}\""))
                .collect();
            source.push_str(&format!("n{node}: {{evos: [{}]}},\n", evos.join(", ")));
        }

        let ctx = EvolutionContext::new(SourceAccess::new(source)).with_max_depth(4);
        let forest = ctx.build_chain_forest(&format!("n{start}"));

        prop_assert!(!forest.chains.is_empty());
        for chain in &forest.chains {
            prop_assert!(chain.len() <= 4);
            let mut ids = chain.ids();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), chain.len());
        }
        let mut seen = forest.chains.iter().map(|c| c.ids()).collect::<Vec<_>>();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);
    }
}
