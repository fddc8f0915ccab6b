use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One item of a paginated listing.
///
/// The listing endpoint only returns `{ name, url }`. Callers that already
/// hold full records can pass those instead, so both shapes decode here.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ListingEntry {
    Detailed(Box<ItemDetail>),
    Reference(NamedResource),
}

impl ListingEntry {
    pub fn name(&self) -> &str {
        match self {
            ListingEntry::Detailed(detail) => &detail.name,
            ListingEntry::Reference(resource) => &resource.name,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ListingEntry::Detailed(_) => None,
            ListingEntry::Reference(resource) => Some(&resource.url),
        }
    }

    /// Explicit id when present, else the trailing segment of the url.
    pub fn display_id(&self) -> String {
        match self {
            ListingEntry::Detailed(detail) => detail.id.to_string(),
            ListingEntry::Reference(resource) => resource_id(&resource.url).to_string(),
        }
    }

    pub fn sprites(&self) -> Option<&Sprites> {
        match self {
            ListingEntry::Detailed(detail) => Some(&detail.sprites),
            ListingEntry::Reference(_) => None,
        }
    }

    /// Type data, if this entry has already been hydrated.
    pub fn types(&self) -> Option<&[TypeSlot]> {
        match self {
            ListingEntry::Detailed(detail) => Some(&detail.types),
            ListingEntry::Reference(_) => None,
        }
    }
}

impl From<NamedResource> for ListingEntry {
    fn from(resource: NamedResource) -> Self {
        ListingEntry::Reference(resource)
    }
}

impl From<ItemDetail> for ListingEntry {
    fn from(detail: ItemDetail) -> Self {
        ListingEntry::Detailed(Box::new(detail))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ItemDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub species: Option<NamedResource>,
}

impl ItemDetail {
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|slot| slot.type_info.name.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

impl Sprites {
    pub fn official_artwork(&self) -> Option<&str> {
        self.other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_info: NamedRef,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedRef,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AbilitySlot {
    pub ability: NamedRef,
    #[serde(default)]
    pub is_hidden: bool,
}

/// A reference where only the name is consumed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SpeciesDetail {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub genera: Vec<GenusEntry>,
}

impl SpeciesDetail {
    pub fn english_flavor_text(&self) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| entry.flavor_text.as_str())
    }

    pub fn english_genus(&self) -> Option<&str> {
        self.genera
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| entry.genus.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedRef,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GenusEntry {
    pub genus: String,
    pub language: NamedRef,
}

/// Trailing non-empty path segment of an API url.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `25`.
pub fn resource_id(url: &str) -> &str {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or("")
}
