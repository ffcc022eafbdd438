//! Shared application state.

use std::sync::Arc;

use calbook_core::{Directory, EventStore, ResourceStore};

#[derive(Clone)]
pub struct AppState {
    pub events: Arc<EventStore>,
    pub resources: Arc<ResourceStore>,
    pub directory: Arc<Directory>,
}

impl AppState {
    pub fn new(directory: Directory) -> Self {
        AppState {
            events: Arc::new(EventStore::new()),
            resources: Arc::new(ResourceStore::new()),
            directory: Arc::new(directory),
        }
    }
}
