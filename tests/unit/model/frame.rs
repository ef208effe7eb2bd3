use super::*;

#[test]
fn defaults_match_script_conventions() {
    let f: Frame = serde_json::from_str(r#"{"structures": {}}"#).unwrap();
    assert_eq!(f.duration, 3.0);
    assert_eq!(f.pre_duration, 1.0);
    assert_eq!(f.post_duration, 2.0);
    assert!(f.variables.is_empty());
    assert!(f.text.is_none());
    assert!(f.line.is_none());
}

#[test]
fn durations_accept_numbers_and_strings() {
    let f: Frame = serde_json::from_str(
        r#"{"structures": {}, "duration": "1.5s", "pre_duration": 0.5, "post_duration": "250ms"}"#,
    )
    .unwrap();
    assert_eq!(f.duration, 1.5);
    assert_eq!(f.pre_duration, 0.5);
    assert!((f.post_duration - 0.25).abs() < 1e-12);
}

#[test]
fn malformed_duration_is_rejected() {
    assert!(serde_json::from_str::<Frame>(r#"{"duration": "soon"}"#).is_err());
    assert!(serde_json::from_str::<Frame>(r#"{"duration": -1}"#).is_err());
}

#[test]
fn structures_keep_script_order() {
    let f: Frame = serde_json::from_str(
        r#"{"structures": {
            "nums": {"type": "array", "elements": [1]},
            "head": {"type": "linked_list", "elements": [1, 2], "is_doubly": true}
        }, "variables": {"res": [], "i": 0}}"#,
    )
    .unwrap();
    let names: Vec<&str> = f.structures.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["nums", "head"]);
    assert!(f.structures.get("head").unwrap().is_doubly);
    let vars: Vec<String> = f
        .variables
        .iter()
        .map(|(k, v)| format!("{k} = {v}"))
        .collect();
    assert_eq!(vars, vec!["res = []", "i = 0"]);
}

#[test]
fn convenience_constructors_name_main() {
    let f = Frame::from_linked_list([1, 2, 3]).with_text("walk").with_line(4);
    let main = f.structures.get("main").unwrap();
    assert_eq!(main.kind, StructureKind::LinkedList);
    assert_eq!(f.text.as_deref(), Some("walk"));
    assert_eq!(f.line, Some(4));
    assert_eq!(Frame::from_array([1]).structures.get("main").unwrap().kind, StructureKind::Array);
}
