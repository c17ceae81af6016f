use smallvec::SmallVec;

use crate::error::{EditorError, EditorResult};

/// Configuration sections that hold ordered multi-instance arrays and are
/// therefore addressable by `dataIndex`.
const ARRAY_SECTIONS: [&str; 4] = ["xAxis", "yAxis", "series", "colorAxis"];

/// One step of a resolved option path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub key: String,
    /// "Find/create the array element whose discriminant equals this tag."
    pub array_tag: Option<String>,
    /// Explicit positional index into an array-valued section.
    pub index: Option<usize>,
}

impl PathSegment {
    #[must_use]
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            array_tag: None,
            index: None,
        }
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.array_tag.is_some() || self.index.is_some()
    }
}

/// Resolved path into the configuration tree; almost always short.
pub type OptionPath = SmallVec<[PathSegment; 4]>;

/// Translates an option id into a structured path.
///
/// Grammar: `--` separates object levels, a single `-` inside a group
/// denotes one more level of nesting, and a `<tag>` suffix on a key marks
/// an array element selected by its discriminant field. `data_index`
/// attaches to the first segment naming a multi-instance section.
///
/// Ids with no markers resolve to a flat single-segment path. Ids with more
/// than one array tag are rejected: the source schema never produces them,
/// and the resolver must not silently guess which one wins.
pub fn resolve_path(id: &str, data_index: Option<usize>) -> EditorResult<OptionPath> {
    if id.is_empty() {
        return Err(malformed(id, "empty id"));
    }

    let mut path = OptionPath::new();
    let mut tags_seen = 0usize;

    for group in id.split("--") {
        if group.is_empty() {
            return Err(malformed(id, "empty `--` group"));
        }
        for atom in split_group(id, group)? {
            let segment = parse_atom(id, atom)?;
            if segment.array_tag.is_some() {
                tags_seen += 1;
                if tags_seen > 1 {
                    return Err(malformed(id, "more than one array tag"));
                }
            }
            path.push(segment);
        }
    }

    if let Some(index) = data_index {
        if let Some(segment) = path
            .iter_mut()
            .find(|s| ARRAY_SECTIONS.contains(&s.key.as_str()))
        {
            segment.index = Some(index);
        }
    }

    Ok(path)
}

/// Splits a `--` group on single dashes, ignoring dashes inside `<...>`.
fn split_group<'a>(id: &str, group: &'a str) -> EditorResult<Vec<&'a str>> {
    let mut atoms = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (position, character) in group.char_indices() {
        match character {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed(id, "unbalanced `>`"))?;
            }
            '-' if depth == 0 => {
                atoms.push(&group[start..position]);
                start = position + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(malformed(id, "unbalanced `<`"));
    }
    atoms.push(&group[start..]);
    Ok(atoms)
}

/// Parses one nesting atom, stripping an optional `<tag>` suffix.
fn parse_atom(id: &str, atom: &str) -> EditorResult<PathSegment> {
    if atom.is_empty() {
        return Err(malformed(id, "empty key segment"));
    }

    let Some(open) = atom.find('<') else {
        return Ok(PathSegment::plain(atom));
    };

    let key = &atom[..open];
    let rest = &atom[open + 1..];
    let Some(close) = rest.find('>') else {
        return Err(malformed(id, "array tag is never closed"));
    };
    let tag = &rest[..close];
    let trailing = &rest[close + 1..];

    if key.is_empty() {
        return Err(malformed(id, "array tag with no key"));
    }
    if tag.is_empty() {
        return Err(malformed(id, "empty array tag"));
    }
    if !trailing.is_empty() || tag.contains('<') {
        return Err(malformed(id, "text around array tag"));
    }

    Ok(PathSegment {
        key: key.to_owned(),
        array_tag: Some(tag.to_owned()),
        index: None,
    })
}

fn malformed(id: &str, reason: &str) -> EditorError {
    EditorError::MalformedOptionId {
        id: id.to_owned(),
        reason: reason.to_owned(),
    }
}
