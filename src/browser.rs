//! A browsing session: the current page of cards and the open overlay.

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::document::GridContainer;
use crate::hydrate::{hydrate_types, hydrate_types_bounded, HydrationReport};
use crate::state::{resource_id, ItemDetail, ListingEntry, SpeciesDetail};
use crate::ui;

#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub detail: ItemDetail,
    pub markup: String,
}

#[derive(Debug)]
pub struct Browser {
    client: ApiClient,
    page_size: u32,
    offset: u32,
    entries: Vec<ListingEntry>,
    container: GridContainer,
    overlay: Option<Overlay>,
}

impl Browser {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
            offset: 0,
            entries: Vec::new(),
            container: GridContainer::new(),
            overlay: None,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn container(&self) -> &GridContainer {
        &self.container
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Paints the page at `offset` from listing data alone.
    pub async fn load_page(&mut self, offset: u32) -> usize {
        let entries = self.client.fetch_listing(self.page_size, offset).await;
        ui::grid_at(&entries, &mut self.container, self.client.base());
        info!(offset, count = entries.len(), "page loaded");
        self.offset = offset;
        self.entries = entries;
        self.entries.len()
    }

    pub async fn next_page(&mut self) -> usize {
        let offset = self.offset.saturating_add(self.page_size);
        self.load_page(offset).await
    }

    pub async fn prev_page(&mut self) -> usize {
        let offset = self.offset.saturating_sub(self.page_size);
        self.load_page(offset).await
    }

    pub async fn hydrate(&mut self, concurrency: usize) -> HydrationReport {
        if concurrency <= 1 {
            hydrate_types(&self.client, &self.entries, &mut self.container).await
        } else {
            hydrate_types_bounded(&self.client, &self.entries, &mut self.container, concurrency)
                .await
        }
    }

    /// Loads detail and species together and paints the overlay. Returns
    /// false, with no overlay shown, when either one cannot be loaded.
    pub async fn open_detail(&mut self, id_or_url: &str) -> bool {
        self.overlay = None;
        let item_url = self.client.item_url(id_or_url);
        let species_url = self.client.species_url(resource_id(&item_url));

        let (detail, species) = tokio::join!(
            self.client.fetch_item_detail(&item_url),
            self.client.fetch_json::<SpeciesDetail>(&species_url),
        );
        let Some(detail) = detail else {
            warn!(%item_url, "detail unavailable");
            return false;
        };

        let species = match species {
            Ok(species) => species,
            // Alternate forms live under their base species, which only the
            // detail record names.
            Err(err) => match detail
                .species
                .as_ref()
                .filter(|linked| resource_id(&linked.url) != resource_id(&species_url))
            {
                Some(linked) => match self.client.fetch_json::<SpeciesDetail>(&linked.url).await {
                    Ok(species) => species,
                    Err(err) => {
                        warn!(error = %err, "species unavailable");
                        return false;
                    }
                },
                None => {
                    warn!(error = %err, "species unavailable");
                    return false;
                }
            },
        };

        let markup = ui::detail_overlay(&detail, &species);
        self.overlay = Some(Overlay { detail, markup });
        true
    }

    /// Drops the overlay along with its detail record.
    pub fn close_detail(&mut self) {
        self.overlay = None;
    }

    pub fn render_page(&self) -> String {
        let mut body = ui::grid_section(&self.container);
        if let Some(overlay) = &self.overlay {
            body.push_str(&overlay.markup);
        }
        ui::page("Pokédex", &body)
    }
}
