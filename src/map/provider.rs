//! Map library seams and the default implementations.
//!
//! A `MapProvider` fetches the map library once; the library then creates
//! `MapInstance`s bound to a container. The default provider talks to the
//! Maps JavaScript endpoint to validate the credential and the library
//! draws with ratatui's world canvas.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use super::locations::LatLng;

/// Failures while loading the library or creating a map
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load map: {0}")]
    Network(String),
    #[error("Map library request returned HTTP {0}")]
    Status(u16),
    #[error("Failed to create map: {0}")]
    Construction(String),
    #[error("Map library load was abandoned")]
    Aborted,
}

pub type LoadResult = Result<Arc<dyn MapLibrary>, LoadError>;

/// Boxed future returned by providers so they can sit behind `dyn`
pub type FetchFuture = Pin<Box<dyn Future<Output = LoadResult> + Send>>;

/// Fetches the external map library
pub trait MapProvider: Send + Sync {
    fn fetch(&self, api_key: &str) -> FetchFuture;
}

/// A loaded map library
pub trait MapLibrary: fmt::Debug + Send + Sync {
    fn create_map(
        &self,
        container: &MapContainer,
        options: MapOptions,
    ) -> Result<Box<dyn MapInstance>, LoadError>;
}

/// A live map bound to a container
pub trait MapInstance: fmt::Debug + Send {
    fn pan_to(&mut self, center: LatLng);
    fn viewport(&self) -> Viewport;
}

/// Screen region a map is drawn into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapContainer {
    pub name: String,
}

impl MapContainer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Zoom range accepted by the terminal map
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 8;

/// Zoom used for backgrounds; a few countries across at terminal resolution
pub const BACKGROUND_ZOOM: u8 = 3;

/// Map construction options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    /// Pan, zoom and controls enabled
    pub interactive: bool,
    pub show_labels: bool,
}

impl MapOptions {
    /// Static, label-free presentation used behind the quiz
    pub fn background(center: LatLng) -> Self {
        Self {
            center,
            zoom: BACKGROUND_ZOOM,
            interactive: false,
            show_labels: false,
        }
    }
}

/// What part of the world a map shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Viewport {
    /// Longitude and latitude bounds around the center. Latitude spans half
    /// the longitude range since terminal cells are about twice as tall as
    /// they are wide.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let half_lng = 180.0 / f64::from(1u32 << self.zoom);
        let half_lat = half_lng / 2.0;
        let lat = self.center.lat.clamp(-90.0 + half_lat, 90.0 - half_lat);
        (
            [self.center.lng - half_lng, self.center.lng + half_lng],
            [lat - half_lat, lat + half_lat],
        )
    }
}

/// Map library drawing onto the terminal
#[derive(Debug, Clone, Default)]
pub struct TerminalMapLibrary {
    pub version: String,
}

impl TerminalMapLibrary {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
        }
    }
}

impl MapLibrary for TerminalMapLibrary {
    fn create_map(
        &self,
        container: &MapContainer,
        options: MapOptions,
    ) -> Result<Box<dyn MapInstance>, LoadError> {
        if !options.center.is_finite() {
            return Err(LoadError::Construction(format!(
                "invalid center {:?}",
                options.center
            )));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&options.zoom) {
            return Err(LoadError::Construction(format!(
                "zoom {} outside {}..={}",
                options.zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        debug!(
            version = %self.version,
            container = %container.name,
            interactive = options.interactive,
            labels = options.show_labels,
            "creating map"
        );
        Ok(Box::new(CanvasMap {
            container: container.name.clone(),
            viewport: Viewport {
                center: options.center,
                zoom: options.zoom,
            },
        }))
    }
}

/// Map instance rendered by `ui::map`
#[derive(Debug, Clone)]
pub struct CanvasMap {
    container: String,
    viewport: Viewport,
}

impl MapInstance for CanvasMap {
    fn pan_to(&mut self, center: LatLng) {
        if center.is_finite() {
            debug!(container = %self.container, lat = center.lat, lng = center.lng, "panning map");
            self.viewport.center = center;
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Default Maps JavaScript endpoint
pub const DEFAULT_MAPS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/js";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the library over HTTP
pub struct HttpMapProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMapProvider {
    pub fn new(endpoint: &str) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl MapProvider for HttpMapProvider {
    fn fetch(&self, api_key: &str) -> FetchFuture {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("key", api_key), ("v", "weekly")]);
        let endpoint = self.endpoint.clone();

        Box::pin(async move {
            info!(%endpoint, "loading map library");
            // without_url keeps the key out of error messages
            let response = request
                .send()
                .await
                .map_err(|e| LoadError::Network(e.without_url().to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status(status.as_u16()));
            }
            let body = response
                .bytes()
                .await
                .map_err(|e| LoadError::Network(e.without_url().to_string()))?;
            info!(bytes = body.len(), "map library loaded");
            Ok(Arc::new(TerminalMapLibrary::new("weekly")) as Arc<dyn MapLibrary>)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_options_are_static() {
        let options = MapOptions::background(LatLng::new(1.0, 2.0));
        assert!(!options.interactive);
        assert!(!options.show_labels);
        assert_eq!(options.zoom, BACKGROUND_ZOOM);
    }

    #[test]
    fn test_create_map_centers_on_options() {
        let library = TerminalMapLibrary::new("test");
        let container = MapContainer::new("question");
        let map = library
            .create_map(&container, MapOptions::background(LatLng::new(48.8566, 2.3522)))
            .unwrap();
        assert_eq!(map.viewport().center, LatLng::new(48.8566, 2.3522));
        assert_eq!(map.viewport().zoom, BACKGROUND_ZOOM);
    }

    #[test]
    fn test_create_map_rejects_bad_zoom() {
        let library = TerminalMapLibrary::default();
        let mut options = MapOptions::background(LatLng::new(0.0, 0.0));
        options.zoom = MAX_ZOOM + 1;
        let err = library
            .create_map(&MapContainer::new("x"), options)
            .unwrap_err();
        assert!(matches!(err, LoadError::Construction(_)));
    }

    #[test]
    fn test_create_map_rejects_non_finite_center() {
        let library = TerminalMapLibrary::default();
        let options = MapOptions::background(LatLng::new(f64::NAN, 0.0));
        assert!(library.create_map(&MapContainer::new("x"), options).is_err());
    }

    #[test]
    fn test_pan_to_moves_center() {
        let library = TerminalMapLibrary::default();
        let mut map = library
            .create_map(
                &MapContainer::new("x"),
                MapOptions::background(LatLng::new(0.0, 0.0)),
            )
            .unwrap();
        map.pan_to(LatLng::new(10.0, 20.0));
        assert_eq!(map.viewport().center, LatLng::new(10.0, 20.0));
        map.pan_to(LatLng::new(f64::INFINITY, 0.0));
        assert_eq!(map.viewport().center, LatLng::new(10.0, 20.0));
    }

    #[test]
    fn test_viewport_bounds() {
        let viewport = Viewport {
            center: LatLng::new(0.0, 0.0),
            zoom: 3,
        };
        let (x, y) = viewport.bounds();
        assert_eq!(x, [-22.5, 22.5]);
        assert_eq!(y, [-11.25, 11.25]);
    }

    #[test]
    fn test_viewport_bounds_clamp_near_pole() {
        let viewport = Viewport {
            center: LatLng::new(89.0, 0.0),
            zoom: 3,
        };
        let (_, y) = viewport.bounds();
        assert_eq!(y[1], 90.0);
    }

    #[test]
    fn test_load_error_messages() {
        assert_eq!(LoadError::Status(403).to_string(), "Map library request returned HTTP 403");
        assert_eq!(
            LoadError::Network("timeout".to_string()).to_string(),
            "Failed to load map: timeout"
        );
    }

    /// Serve one canned HTTP response on a local port. The task resolves
    /// to the request line it received.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/maps/api/js", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (endpoint, server)
    }

    #[tokio::test]
    async fn test_http_fetch_sends_key_and_version() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 14\r\nConnection: close\r\n\r\nwindow.maps={}",
        )
        .await;
        let provider = HttpMapProvider::new(&endpoint).unwrap();

        let library = provider.fetch("secret").await.unwrap();
        let map = library
            .create_map(
                &MapContainer::new("x"),
                MapOptions::background(LatLng::new(0.0, 0.0)),
            )
            .unwrap();
        assert_eq!(map.viewport().zoom, BACKGROUND_ZOOM);

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /maps/api/js?"));
        assert!(request_line.contains("key=secret"));
        assert!(request_line.contains("v=weekly"));
    }

    #[tokio::test]
    async fn test_http_fetch_maps_error_status() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 403 Forbidden\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let provider = HttpMapProvider::new(&endpoint).unwrap();

        let err = provider.fetch("secret").await.unwrap_err();
        assert_eq!(err, LoadError::Status(403));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_fetch_network_error_hides_key() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/maps/api/js", listener.local_addr().unwrap());
        drop(listener);
        let provider = HttpMapProvider::new(&endpoint).unwrap();

        let err = provider.fetch("secret").await.unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
        assert!(!err.to_string().contains("secret"));
    }
}
