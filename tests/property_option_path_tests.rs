use chartedit_rs::core::resolve_path;
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,7}"
}

/// Well-formed ids: 1-3 `--` groups of 1-3 `-` atoms, with at most one
/// `<tag>` on the very first atom.
fn id_strategy() -> impl Strategy<Value = (String, usize, bool)> {
    (
        prop::collection::vec(prop::collection::vec(key_strategy(), 1..=3), 1..=3),
        prop::option::of(key_strategy()),
    )
        .prop_map(|(groups, tag)| {
            let total_atoms: usize = groups.iter().map(Vec::len).sum();
            let tagged = tag.is_some();
            let rendered: Vec<String> = groups
                .iter()
                .enumerate()
                .map(|(group_index, atoms)| {
                    let mut atoms = atoms.clone();
                    if group_index == 0 {
                        if let Some(tag) = &tag {
                            atoms[0] = format!("{}<{}>", atoms[0], tag);
                        }
                    }
                    atoms.join("-")
                })
                .collect();
            (rendered.join("--"), total_atoms, tagged)
        })
}

proptest! {
    #[test]
    fn grammar_conforming_ids_always_resolve((id, total_atoms, tagged) in id_strategy()) {
        let path = resolve_path(&id, None).expect("well-formed id");
        prop_assert_eq!(path.len(), total_atoms);
        prop_assert_eq!(path.iter().filter(|s| s.array_tag.is_some()).count(), usize::from(tagged));
    }

    #[test]
    fn resolution_is_deterministic_and_idempotent(
        (id, _, _) in id_strategy(),
        data_index in prop::option::of(0usize..4)
    ) {
        let first = resolve_path(&id, data_index).expect("well-formed id");
        let second = resolve_path(&id, data_index).expect("well-formed id");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn keys_survive_round_trip_through_the_grammar(
        groups in prop::collection::vec(prop::collection::vec("[a-z]{1,6}", 1..=3), 1..=3)
    ) {
        let id: String = groups
            .iter()
            .map(|atoms| atoms.join("-"))
            .collect::<Vec<_>>()
            .join("--");
        let expected: Vec<&String> = groups.iter().flatten().collect();

        let path = resolve_path(&id, None).expect("well-formed id");
        let keys: Vec<&String> = path.iter().map(|s| &s.key).collect();
        prop_assert_eq!(keys, expected);
    }
}
