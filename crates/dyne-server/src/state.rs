use std::sync::Arc;

use anyhow::Context;
use dyne_core::{Assistant, ConceptDictionary, Ranker, RestaurantStore, Scorer};
use tracing::info;

use super::{config::Config, store::JsonCatalogStore};

pub struct AppState {
    pub config: Config,
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let dictionary = match &config.concepts_path {
            Some(path) => {
                info!("Loading concept dictionary from {}", path.display());
                ConceptDictionary::from_path(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?
            }
            None => ConceptDictionary::default(),
        };
        info!(
            "Concept dictionary ready with {} concepts: {}",
            dictionary.len(),
            dictionary.names().collect::<Vec<_>>().join(", ")
        );

        let store: Arc<dyn RestaurantStore> = Arc::new(JsonCatalogStore::new(
            &config.catalog_path,
            &config.dishes_path,
        ));
        info!(
            "Serving catalog from {} (dishes in {})",
            config.catalog_path.display(),
            config.dishes_path.display()
        );

        Ok(Self::with_store(config, store, dictionary))
    }

    pub fn with_store(
        config: Config,
        store: Arc<dyn RestaurantStore>,
        dictionary: ConceptDictionary,
    ) -> Arc<Self> {
        let assistant = Assistant::new(store, Ranker::new(Scorer::with_dictionary(dictionary)))
            .with_locale(config.locale)
            .with_limit(config.result_limit);

        Arc::new(Self { config, assistant })
    }
}
