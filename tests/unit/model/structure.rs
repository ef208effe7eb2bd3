use super::*;

#[test]
fn kind_parses_known_names_and_rejects_others() {
    assert_eq!("array".parse::<StructureKind>().unwrap(), StructureKind::Array);
    assert_eq!(
        "linked_list".parse::<StructureKind>().unwrap(),
        StructureKind::LinkedList
    );
    assert_eq!(" Tree ".parse::<StructureKind>().unwrap(), StructureKind::Tree);
    let err = "graph".parse::<StructureKind>().unwrap_err();
    assert!(matches!(err, VizError::Validation(_)));
}

#[test]
fn unknown_type_fails_deserialization() {
    let res = serde_json::from_str::<DataStructure>(r#"{"type": "heap", "elements": [1]}"#);
    assert!(res.is_err());
}

#[test]
fn deserializes_with_defaults_and_integer_keys() {
    let ds: DataStructure = serde_json::from_str(
        r#"{
            "type": "array",
            "elements": [-4, -1, -1, 0, 1, 2],
            "highlighted": [0],
            "labels": {"0": ["anchor"]},
            "pointers": {"0": ["i"]}
        }"#,
    )
    .unwrap();
    assert_eq!(ds.kind, StructureKind::Array);
    assert_eq!(ds.len(), 6);
    assert!(ds.highlighted.contains(&0));
    assert_eq!(ds.labels[&0], vec!["anchor".to_string()]);
    assert_eq!(ds.pointers[&0], vec!["i".to_string()]);
    assert!(ds.arrows.is_empty());
    assert!(ds.self_arrows.is_empty());
    assert!(ds.position.is_none());
    assert!(!ds.is_doubly);
}

#[test]
fn builder_accumulates_annotations() {
    let ds = DataStructure::array([1, 2, 3])
        .highlight([0, 2])
        .arrow(0, 2)
        .label(1, "mid")
        .label(1, "x")
        .pointer(2, "j")
        .self_arrow(1)
        .at(10, 20);
    assert_eq!(ds.highlighted.iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(ds.arrows, vec![(0, 2)]);
    assert_eq!(ds.labels[&1], vec!["mid".to_string(), "x".to_string()]);
    assert_eq!(ds.position, Some((10, 20)));
}

#[test]
fn tree_with_missing_root_is_empty() {
    assert!(DataStructure::tree([None::<i64>, Some(1)]).is_empty());
    assert!(!DataStructure::tree([Some(1)]).is_empty());
    assert!(DataStructure::array(Vec::<i64>::new()).is_empty());
}
