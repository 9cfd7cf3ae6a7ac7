/// A single card extracted from raw text, before it is reconciled against
/// the remote deck. Both fields are trimmed; either may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedRecord {
    pub name: String,
    pub content: String,
}

/// Split `text` into card records on `delimiter`.
///
/// A new card starts where the text itself starts with the delimiter (after
/// leading whitespace), or at any later `"\n{delimiter} "` occurrence. The
/// first line after the delimiter is the card name, everything up to the next
/// card marker is its content.
///
/// Degenerate input produces degenerate records rather than errors: a
/// delimiter with no following newline yields a record with empty content,
/// and back-to-back delimiters yield records with empty name and/or content.
/// An empty delimiter is a caller configuration error and must be rejected
/// before this function is reached.
pub fn segment(text: &str, delimiter: &str) -> Vec<SegmentedRecord> {
    let marker = format!("\n{} ", delimiter);
    let mut records = Vec::new();
    let mut remaining = text;

    while remaining.contains(&marker) || remaining.trim_start().starts_with(delimiter) {
        let after = match remaining.find(delimiter) {
            Some(i) => &remaining[i + delimiter.len()..],
            None => remaining,
        };
        let selection = after.trim();

        // The name runs to the end of the line; without a newline the whole
        // remainder is the name and the content is empty.
        let (name, rest) = match selection.find('\n') {
            Some(i) => (selection[..i].trim(), selection[i + 1..].trim()),
            None => (selection, ""),
        };

        // Another card may start inside what would otherwise be this card's
        // content. Cut the content there and re-parse from that marker.
        let (content, next) = match rest.find(&marker) {
            Some(i) => (rest[..i].trim(), &rest[i..]),
            None => (rest, ""),
        };

        records.push(SegmentedRecord { name: name.to_string(), content: content.to_string() });
        remaining = next;
    }

    records
}
