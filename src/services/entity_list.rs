use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::watch;

use crate::repositories::EntityRepository;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityListState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for EntityListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
        }
    }
}

/// Loads one entity collection and publishes `{items, is_loading, error}`.
pub struct EntityListController<T: Send + Sync + 'static> {
    repository: Arc<dyn EntityRepository<T>>,
    state: watch::Sender<EntityListState<T>>,
    generation: AtomicU64,
}

impl<T: Clone + Send + Sync + 'static> EntityListController<T> {
    pub fn new(repository: Arc<dyn EntityRepository<T>>) -> Self {
        let (state, _) = watch::channel(EntityListState::default());
        Self {
            repository,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> EntityListState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EntityListState<T>> {
        self.state.subscribe()
    }

    /// Fetch the whole collection. Items from the last successful load stay
    /// visible when a later load fails.
    pub async fn load(&self) {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_loading = true;
            state.error = None;
        });

        let result = self.repository.get_all().await;

        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            state.is_loading = false;
            match result {
                Ok(items) => {
                    state.items = items;
                    state.error = None;
                }
                Err(err) => state.error = Some(err.message().to_string()),
            }
            true
        });
    }

    pub async fn retry(&self) {
        self.load().await
    }
}
