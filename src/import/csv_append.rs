/// Merges a newly fetched CSV payload into existing CSV text by matching
/// rows on the value of each existing row's first cell.
///
/// A match is the first incoming row with *any* cell containing the join
/// key as a substring. This mirrors the original editor behavior, loose
/// numeric-prefix matches included; exact matching is pending product
/// review. The matched incoming row contributes all cells except its own
/// first cell. Unmatched existing rows pass through unchanged.
///
/// Absence of a match is not an error; this function never fails. Empty
/// existing text is replaced wholesale by the incoming payload.
#[must_use]
pub fn append_merge(existing: &str, incoming: &str) -> String {
    if existing.is_empty() {
        return incoming.to_owned();
    }

    let incoming_rows: Vec<Vec<&str>> = incoming
        .lines()
        .map(|line| line.split(',').collect())
        .collect();

    let mut merged_lines = Vec::new();
    for line in existing.lines() {
        let mut cells: Vec<&str> = line.split(',').collect();
        let join_key = cells[0];

        let matched = incoming_rows
            .iter()
            .find(|row| row.iter().any(|cell| cell.contains(join_key)));
        if let Some(row) = matched {
            cells.extend(row.iter().skip(1).copied());
        }

        merged_lines.push(cells.join(","));
    }

    merged_lines.join("\n")
}
