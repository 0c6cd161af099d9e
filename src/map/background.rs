//! Map background view lifecycle.
//!
//! A `MapBackground` belongs to one screen. Mounting asks the registry for
//! the library and creates the view's single map instance; later target
//! changes pan that instance. Failures stay inside the view: it reports an
//! error and draws nothing, and the rest of the UI carries on.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::locations::{resolve, Location, LocationTarget};
use super::provider::{LoadError, MapContainer, MapInstance, MapLibrary, MapOptions, Viewport};
use super::registry::{LibraryRegistry, LoadRequest, PendingLoad};
use crate::config::MapsConfig;

/// What the renderer should draw for a map view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapViewState {
    /// Not configured or still loading
    Placeholder,
    /// Map is live
    Ready(Viewport),
    /// Load failed; draw nothing
    Hidden,
}

pub struct MapBackground {
    name: String,
    registry: LibraryRegistry,
    config: MapsConfig,
    container: Option<MapContainer>,
    instance: Option<Box<dyn MapInstance>>,
    pending: Option<PendingLoad>,
    location: Location,
    loaded: bool,
    error: Option<LoadError>,
    mounted: bool,
}

impl MapBackground {
    pub fn new(
        name: &str,
        registry: LibraryRegistry,
        config: MapsConfig,
        target: &LocationTarget,
    ) -> Self {
        Self {
            name: name.to_string(),
            registry,
            config,
            container: None,
            instance: None,
            pending: None,
            location: resolve(target),
            loaded: false,
            error: None,
            mounted: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[cfg(test)]
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.instance.as_ref().map(|map| map.viewport())
    }

    pub fn state(&self) -> MapViewState {
        if self.error().is_some() {
            return MapViewState::Hidden;
        }
        match self.viewport() {
            Some(viewport) if self.is_loaded() => MapViewState::Ready(viewport),
            _ => MapViewState::Placeholder,
        }
    }

    /// Attach the view and start (or join) the library load
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.error = None;
        self.container = Some(MapContainer::new(&self.name));
        debug!(view = %self.name, location = %self.location.name, "map background mounted");

        // Remount: the cached instance only needs to catch up
        if let Some(map) = &mut self.instance {
            if map.viewport().center != self.location.position {
                map.pan_to(self.location.position);
            }
            self.loaded = true;
            return;
        }

        let Some(api_key) = self.config.credential() else {
            warn!(view = %self.name, "maps API key not configured, map background will not display");
            return;
        };

        match self.registry.request(api_key) {
            LoadRequest::Ready(library) => self.init_map(&library),
            LoadRequest::Pending(pending) => self.pending = Some(pending),
        }
    }

    /// Pick up a finished load. Returns true if the view changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = &mut self.pending else {
            return false;
        };
        let Some(result) = pending.try_take() else {
            return false;
        };
        self.pending = None;

        match result {
            Ok(library) => self.init_map(&library),
            Err(err) => {
                error!(view = %self.name, %err, "error loading map library");
                self.error = Some(err);
            }
        }
        true
    }

    /// Follow a new target. Pans the live map; without one only the stored
    /// location changes, and the map is created there later.
    pub fn set_target(&mut self, target: &LocationTarget) {
        let next = resolve(target);
        if next == self.location {
            return;
        }
        self.location = next;

        match &mut self.instance {
            Some(map) if self.loaded => {
                debug!(view = %self.name, location = %self.location.name, "moving map");
                map.pan_to(self.location.position);
            }
            _ => debug!(view = %self.name, location = %self.location.name, "map not ready, keeping location for later"),
        }
    }

    /// Detach from the screen. The instance stays cached for a remount.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        if let Some(pending) = self.pending.take() {
            self.registry.detach(pending.id());
        }
        self.container = None;
        self.loaded = false;
        self.mounted = false;
        debug!(view = %self.name, "map background unmounted");
    }

    fn init_map(&mut self, library: &Arc<dyn MapLibrary>) {
        // Both the ready path and a late listener can land here
        if self.instance.is_some() {
            return;
        }
        let Some(container) = &self.container else {
            return;
        };

        match library.create_map(container, MapOptions::background(self.location.position)) {
            Ok(map) => {
                info!(view = %self.name, location = %self.location.name, "map initialized");
                self.instance = Some(map);
                self.loaded = true;
            }
            Err(err) => {
                error!(view = %self.name, %err, "error creating map");
                self.error = Some(err);
            }
        }
    }
}
