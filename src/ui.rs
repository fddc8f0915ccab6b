//! Markup rendering for the card grid and the detail overlay.

use crate::api::API_BASE;
use crate::document::{type_slot_id, CardMarkup, GridContainer};
use crate::palette::{stat_label, type_color};
use crate::state::{
    AbilitySlot, ItemDetail, ListingEntry, SpeciesDetail, Sprites, StatSlot, TypeSlot,
};

pub const SPRITE_FALLBACK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/pokemon";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const DEFAULT_GENUS: &str = "Pokémon";

/// Rough ceiling for a base stat; some stats exceed it and clip.
const STAT_BAR_MAX: f64 = 255.0;

/// `#` plus the id left-padded to four digits. Longer ids are kept whole.
pub fn format_id(id: impl std::fmt::Display) -> String {
    format!("#{:0>4}", id.to_string())
}

pub fn type_badge(type_name: &str) -> String {
    let color = type_color(type_name);
    format!(
        r#"<span class="inline-block px-2 py-0.5 rounded text-xs font-bold text-white capitalize shadow-sm" style="background-color: {color}; text-shadow: 0 1px 2px rgba(0,0,0,0.3);">{name}</span>"#,
        name = escape(type_name),
    )
}

pub fn type_badges(types: &[TypeSlot]) -> String {
    types
        .iter()
        .map(|slot| type_badge(&slot.type_info.name))
        .collect()
}

pub fn sprite_fallback_url(id: &str) -> String {
    format!("{SPRITE_FALLBACK_BASE}/{id}.png")
}

/// Front sprite, then official artwork, then a guess at the sprite CDN.
pub fn image_url(sprites: Option<&Sprites>, id: &str) -> String {
    sprites
        .and_then(|sprites| {
            sprites
                .front_default
                .as_deref()
                .or_else(|| sprites.official_artwork())
        })
        .map(str::to_string)
        .unwrap_or_else(|| sprite_fallback_url(id))
}

/// Paints one card per entry, replacing whatever the container held.
pub fn grid(entries: &[ListingEntry], container: &mut GridContainer) {
    grid_at(entries, container, API_BASE);
}

/// [`grid`] with `api_base` used for the `data-url` of entries that carry
/// no url of their own.
pub fn grid_at(entries: &[ListingEntry], container: &mut GridContainer, api_base: &str) {
    let cards = entries.iter().map(|entry| card(entry, api_base)).collect();
    container.replace(cards);
}

fn card(entry: &ListingEntry, api_base: &str) -> CardMarkup {
    let id = entry.display_id();
    let name = escape(entry.name());
    let image = escape(&image_url(entry.sprites(), &id));
    let data_url = entry
        .url()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{api_base}/pokemon/{id}/"));
    let types = entry.types().map(type_badges).unwrap_or_default();

    let head = format!(
        r#"<div class="pokemon-card group relative bg-surface border border-border rounded-xl p-4 cursor-pointer transition-all duration-300 hover:border-accent hover:-translate-y-1" data-url="{data_url}" data-id="{id_attr}">
  <div class="absolute top-2 right-3 font-mono text-secondary font-bold text-sm">{formatted}</div>
  <div class="aspect-square mb-2 flex items-center justify-center">
    <img src="{image}" alt="{name}" loading="lazy" class="pokemon-art w-full h-full object-contain drop-shadow-md">
  </div>
  <h3 class="text-center font-bold text-lg capitalize mb-1">{name}</h3>
  <div class="flex justify-center gap-1 flex-wrap mt-2" id="{slot}">"#,
        data_url = escape(&data_url),
        id_attr = escape(&id),
        formatted = escape(&format_id(&id)),
        slot = escape(&type_slot_id(&id)),
    );

    CardMarkup {
        id,
        head,
        types,
        tail: "</div>\n</div>\n".to_string(),
    }
}

pub fn flavor_text(species: &SpeciesDetail) -> String {
    species
        .english_flavor_text()
        .map(|text| text.replace('\u{000C}', " "))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

pub fn genus(species: &SpeciesDetail) -> &str {
    species.english_genus().unwrap_or(DEFAULT_GENUS)
}

/// Formats a tenths-of-unit measurement: 7 -> `0.7`, 10 -> `1`.
pub fn format_tenths(value: u32) -> String {
    if value % 10 == 0 {
        (value / 10).to_string()
    } else {
        format!("{}.{}", value / 10, value % 10)
    }
}

/// Width of a stat bar as a percentage, clipped at 100.
pub fn stat_bar_width(base_stat: u32) -> f64 {
    (f64::from(base_stat) / STAT_BAR_MAX * 100.0).min(100.0)
}

pub fn stat_bar(stat: &StatSlot) -> String {
    format!(
        r#"<div class="flex items-center text-sm mb-1">
  <span class="w-16 font-mono text-secondary font-bold text-xs">{label}</span>
  <span class="w-8 font-mono font-bold text-right mr-2">{value}</span>
  <div class="flex-1 h-1.5 bg-gray-800 rounded-full overflow-hidden">
    <div class="h-full bg-accent" style="width: {width}%"></div>
  </div>
</div>
"#,
        label = escape(&stat_label(&stat.stat.name)),
        value = stat.base_stat,
        width = stat_bar_width(stat.base_stat),
    )
}

pub fn ability_chip(ability: &AbilitySlot) -> String {
    let hidden = if ability.is_hidden { " (Hidden)" } else { "" };
    format!(
        r#"<span class="text-xs bg-black/50 px-2 py-1 rounded border border-border text-gray-300 capitalize">{name}{hidden}</span>"#,
        name = escape(&ability.ability.name.replace('-', " ")),
    )
}

pub fn detail_overlay(item: &ItemDetail, species: &SpeciesDetail) -> String {
    let id = item.id.to_string();
    let name = escape(&item.name);
    let image = escape(&image_url(Some(&item.sprites), &id));
    let stats: String = item.stats.iter().map(stat_bar).collect();
    let abilities: String = item.abilities.iter().map(ability_chip).collect();

    format!(
        r#"<div class="fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/80 backdrop-blur-sm" id="modal-backdrop">
<div class="bg-surface border border-accent rounded-2xl w-full max-w-2xl max-h-[90vh] overflow-y-auto shadow-2xl relative" id="modal-content">
<button class="absolute top-4 right-4 text-secondary hover:text-white z-10 p-2" id="close-modal">&times;</button>
<div class="grid grid-cols-1 md:grid-cols-2 gap-6 p-6 md:p-8">
<div class="flex flex-col items-center justify-center relative">
  <div class="font-mono text-secondary/30 text-6xl md:text-8xl font-bold absolute top-0 opacity-20 select-none">{formatted}</div>
  <img src="{image}" alt="{name}" class="pokemon-art w-48 h-48 md:w-64 md:h-64 object-contain z-10 drop-shadow-2xl">
  <div class="flex gap-2 mt-4 flex-wrap justify-center">{types}</div>
</div>
<div class="flex flex-col">
  <h2 class="text-3xl font-bold capitalize mb-1">{name}</h2>
  <p class="text-secondary font-mono text-sm mb-4">{genus}</p>
  <p class="text-gray-300 text-sm mb-6 leading-relaxed">{flavor}</p>
  <div class="grid grid-cols-2 gap-4 mb-6">
    <div class="bg-black/30 p-3 rounded-lg text-center border border-border">
      <div class="text-secondary text-xs uppercase font-bold mb-1">Height</div>
      <div class="font-mono font-bold">{height}m</div>
    </div>
    <div class="bg-black/30 p-3 rounded-lg text-center border border-border">
      <div class="text-secondary text-xs uppercase font-bold mb-1">Weight</div>
      <div class="font-mono font-bold">{weight}kg</div>
    </div>
  </div>
  <div class="mb-4">
    <h4 class="text-sm font-bold text-secondary uppercase mb-2">Base Stats</h4>
{stats}  </div>
  <div>
    <h4 class="text-sm font-bold text-secondary uppercase mb-1">Abilities</h4>
    <div class="flex gap-2 flex-wrap">{abilities}</div>
  </div>
</div>
</div>
</div>
</div>
"#,
        formatted = format_id(item.id),
        types = type_badges(&item.types),
        genus = escape(genus(species)),
        flavor = escape(&flavor_text(species)),
        height = format_tenths(item.height),
        weight = format_tenths(item.weight),
    )
}

/// Wraps rendered fragments in a standalone document.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-black text-white">
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn grid_section(container: &GridContainer) -> String {
    format!(
        "<main class=\"grid grid-cols-2 md:grid-cols-4 lg:grid-cols-6 gap-4 p-6\" id=\"pokemon-grid\">\n{}</main>\n",
        container.inner_html()
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
