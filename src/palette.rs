//! Static lookup tables for badge colors and stat labels.

pub const DEFAULT_TYPE_COLOR: &str = "#777";

pub const TYPE_COLORS: [(&str, &str); 17] = [
    ("normal", "#A8A77A"),
    ("fire", "#EE8130"),
    ("water", "#6390F0"),
    ("electric", "#F7D02C"),
    ("grass", "#7AC74C"),
    ("ice", "#96D9D6"),
    ("fighting", "#C22E28"),
    ("poison", "#A33EA1"),
    ("ground", "#E2BF65"),
    ("flying", "#A98FF3"),
    ("psychic", "#F95587"),
    ("bug", "#A6B91A"),
    ("rock", "#B6A136"),
    ("ghost", "#735797"),
    ("dragon", "#6F35FC"),
    ("steel", "#B7B7CE"),
    ("fairy", "#D685AD"),
];

pub fn type_color(name: &str) -> &'static str {
    TYPE_COLORS
        .iter()
        .find(|(type_name, _)| *type_name == name)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_TYPE_COLOR)
}

/// Short label for a stat key; unknown keys are uppercased.
pub fn stat_label(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SP.ATK".to_string(),
        "special-defense" => "SP.DEF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}
