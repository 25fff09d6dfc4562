//! Map list parsing

/// Characters accepted between map identifiers
pub const MAP_SEPARATORS: [char; 2] = ['+', ';'];

/// Split a map list on `+` or `;`, dropping empty entries
///
/// Entries are kept verbatim otherwise; surrounding whitespace is not trimmed.
pub fn parse_map_list(maps: &str) -> Vec<String> {
    maps.split(MAP_SEPARATORS)
        .filter(|map| !map.is_empty())
        .map(str::to_string)
        .collect()
}
