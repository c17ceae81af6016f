use chartedit_rs::core::{PathSegment, resolve_path};
use chartedit_rs::error::EditorError;

#[test]
fn flat_id_resolves_to_single_segment() {
    let path = resolve_path("colors", None).expect("valid id");
    assert_eq!(path.len(), 1);
    assert_eq!(path[0], PathSegment::plain("colors"));
}

#[test]
fn double_dash_separates_object_levels() {
    let path = resolve_path("title--text", None).expect("valid id");
    let keys: Vec<&str> = path.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["title", "text"]);
}

#[test]
fn single_dash_nests_within_a_group() {
    let path = resolve_path("series-marker--enabled", None).expect("valid id");
    let keys: Vec<&str> = path.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["series", "marker", "enabled"]);
    assert!(path.iter().all(|s| !s.is_array()));
}

#[test]
fn array_tag_is_stripped_into_its_segment() {
    let path = resolve_path("series<treemap>--color", None).expect("valid id");
    assert_eq!(path.len(), 2);
    assert_eq!(path[0].key, "series");
    assert_eq!(path[0].array_tag.as_deref(), Some("treemap"));
    assert_eq!(path[1], PathSegment::plain("color"));
}

#[test]
fn tag_followed_by_nesting_in_same_group() {
    let path = resolve_path("series<bubble>-marker--symbol", None).expect("valid id");
    let keys: Vec<&str> = path.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["series", "marker", "symbol"]);
    assert_eq!(path[0].array_tag.as_deref(), Some("bubble"));
}

#[test]
fn data_index_attaches_to_the_array_section_segment() {
    let path = resolve_path("xAxis-title--text", Some(1)).expect("valid id");
    assert_eq!(path[0].key, "xAxis");
    assert_eq!(path[0].index, Some(1));
    assert_eq!(path[1].index, None);
    assert_eq!(path[2].index, None);
}

#[test]
fn data_index_without_array_section_is_ignored() {
    let path = resolve_path("title--text", Some(2)).expect("valid id");
    assert!(path.iter().all(|s| s.index.is_none()));
}

#[test]
fn resolution_is_idempotent() {
    for id in ["colors", "series<bubble>-marker--symbol", "xAxis-title--text"] {
        let first = resolve_path(id, Some(1)).expect("valid id");
        let second = resolve_path(id, Some(1)).expect("valid id");
        assert_eq!(first, second);
    }
}

#[test]
fn multiple_array_tags_are_rejected() {
    let result = resolve_path("series<pie>--marker<big>--radius", None);
    assert!(matches!(
        result,
        Err(EditorError::MalformedOptionId { .. })
    ));
}

#[test]
fn unclosed_tag_is_rejected() {
    assert!(matches!(
        resolve_path("series<treemap--color", None),
        Err(EditorError::MalformedOptionId { .. })
    ));
}

#[test]
fn text_after_tag_is_rejected() {
    assert!(matches!(
        resolve_path("series<a>b--color", None),
        Err(EditorError::MalformedOptionId { .. })
    ));
}

#[test]
fn empty_segments_are_rejected() {
    for id in ["", "--text", "title--", "series--marker--", "a--b---c"] {
        assert!(
            matches!(
                resolve_path(id, None),
                Err(EditorError::MalformedOptionId { .. })
            ),
            "id {id:?} should be malformed"
        );
    }
}
