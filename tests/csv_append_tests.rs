use chartedit_rs::import::append_merge;

#[test]
fn matched_rows_gain_columns_and_unmatched_pass_through() {
    let merged = append_merge("A,1\nB,2", "A,x\nC,y");
    assert_eq!(merged, "A,1,x\nB,2");
}

#[test]
fn empty_existing_text_is_replaced_wholesale() {
    let merged = append_merge("", "Date,Value\n2024,3");
    assert_eq!(merged, "Date,Value\n2024,3");
}

#[test]
fn incoming_first_cell_is_never_appended() {
    let merged = append_merge("Oslo,100", "Oslo,42,13");
    assert_eq!(merged, "Oslo,100,42,13");
}

#[test]
fn no_match_anywhere_leaves_existing_unchanged() {
    let existing = "A,1\nB,2\nC,3";
    assert_eq!(append_merge(existing, "X,9\nY,8"), existing);
}

#[test]
fn join_key_matches_any_cell_as_substring() {
    // "10" is a substring of the second cell "2010"; the loose matching is
    // source behavior and must hold even when it looks like a false match.
    let merged = append_merge("10,first", "other,2010,extra");
    assert_eq!(merged, "10,first,2010,extra");
}

#[test]
fn first_matching_incoming_row_wins() {
    let merged = append_merge("A,1", "A,early\nA,late");
    assert_eq!(merged, "A,1,early");
}

#[test]
fn multiple_existing_rows_each_match_independently() {
    let merged = append_merge("A,1\nB,2", "B,bee\nA,ay");
    assert_eq!(merged, "A,1,ay\nB,2,bee");
}

#[test]
fn merge_never_fails_on_ragged_rows() {
    let merged = append_merge("A\nB,2,3", "A,x,y");
    assert_eq!(merged, "A,x,y\nB,2,3");
}
