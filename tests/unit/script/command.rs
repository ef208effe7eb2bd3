use super::*;

const SCRIPT: &str = r#"{
    "code": "nums[0], nums[3] = nums[3], nums[0]",
    "structures": [
        { "name": "main", "kind": "array", "elements": [2, 4, 6, 8] },
        { "name": "seen", "kind": "linked_list", "elements": [], "position": [100, 900] }
    ],
    "commands": [
        {
            "step": 1,
            "target": "main",
            "state": { "elements": [8, 4, 6, 2], "highlighted": [0, 3], "arrows": [[0, 3]] },
            "duration": "1.5s",
            "line": 1,
            "text": "Swap the ends"
        },
        { "step": 2, "target": "main", "action": "delete", "args": [1] }
    ]
}"#;

#[test]
fn parses_a_full_script() {
    let script = CommandScript::from_reader(SCRIPT.as_bytes()).unwrap();
    assert_eq!(script.structures.len(), 2);
    assert_eq!(script.structures[1].kind, StructureKind::LinkedList);
    assert_eq!(script.structures[1].position, Some((100, 900)));

    let first = &script.commands[0];
    assert_eq!(first.duration_secs().unwrap(), 1.5);
    assert_eq!(first.line, Some(1));
    let CommandAction::State(state) = first.resolve().unwrap() else {
        panic!("state command expected");
    };
    assert_eq!(state.elements.len(), 4);
    assert!(state.highlighted.contains(&3));
    assert_eq!(state.arrows, vec![(0, 3)]);

    let second = &script.commands[1];
    assert_eq!(second.duration_secs().unwrap(), DEFAULT_COMMAND_SECS);
    assert_eq!(
        second.resolve().unwrap(),
        CommandAction::Operation(Operation::Delete { index: 1 })
    );
}

#[test]
fn unknown_target_is_rejected() {
    let json = r#"{ "structures": [], "commands": [ { "target": "ghost", "state": {} } ] }"#;
    let err = CommandScript::from_reader(json.as_bytes()).unwrap_err();
    assert!(matches!(err, VizError::Validation(_)));
}

#[test]
fn malformed_duration_is_a_validation_error() {
    let cmd = VisualizationCommand::to_state(1, "main", StateSpec::default()).with_duration("soon");
    assert!(matches!(cmd.duration_secs(), Err(VizError::Validation(_))));
}

#[test]
fn unknown_action_is_a_validation_error() {
    let mut cmd = VisualizationCommand::to_state(1, "main", StateSpec::default());
    cmd.action = Some("shuffle".into());
    assert!(matches!(cmd.resolve(), Err(VizError::Validation(_))));
}

#[test]
fn empty_command_is_rejected() {
    let mut cmd = VisualizationCommand::to_state(4, "main", StateSpec::default());
    cmd.state = None;
    assert!(cmd.resolve().is_err());
}

#[test]
fn duplicate_structure_names_are_rejected() {
    let json = r#"{ "structures": [
        { "name": "a", "kind": "array" },
        { "name": "a", "kind": "linked_list" }
    ] }"#;
    assert!(CommandScript::from_reader(json.as_bytes()).is_err());
}

#[test]
fn unknown_kind_fails_to_parse() {
    let json = r#"{ "structures": [ { "name": "g", "kind": "graph" } ] }"#;
    assert!(CommandScript::from_reader(json.as_bytes()).is_err());
}

#[test]
fn only_sequences_are_declared() {
    for kind in ["dict", "set", "tree"] {
        let json = format!(r#"{{ "structures": [ {{ "name": "s", "kind": "{kind}" }} ] }}"#);
        assert!(matches!(
            CommandScript::from_reader(json.as_bytes()),
            Err(VizError::Validation(_))
        ));
    }
}
