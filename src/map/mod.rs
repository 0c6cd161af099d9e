//! Map background subsystem.
//!
//! - `locations`: reference city table and label/index resolution
//! - `provider`: library/instance seams, HTTP provider and terminal map
//! - `registry`: process-wide, load-once library status
//! - `background`: per-view lifecycle (mount, re-center, unmount)

mod background;
mod locations;
mod provider;
mod registry;

pub use background::{MapBackground, MapViewState};
pub use locations::LocationTarget;
pub use provider::{HttpMapProvider, DEFAULT_MAPS_ENDPOINT};
pub use registry::LibraryRegistry;

#[cfg(test)]
pub use locations::{city_at, find_city};
