//! Reference city table and location resolution.

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Entry in the reference table
#[derive(Debug, Clone, Copy)]
pub struct City {
    pub name: &'static str,
    pub position: LatLng,
}

const fn city(name: &'static str, lat: f64, lng: f64) -> City {
    City {
        name,
        position: LatLng::new(lat, lng),
    }
}

/// Cities the map background rotates through and resolves labels against
pub const CITIES: [City; 20] = [
    city("Tokyo", 35.6762, 139.6503),
    city("Paris", 48.8566, 2.3522),
    city("New York", 40.7128, -74.0060),
    city("Sydney", -33.8688, 151.2093),
    city("Dubai", 25.2048, 55.2708),
    city("London", 51.5074, -0.1278),
    city("Singapore", 1.3521, 103.8198),
    city("Barcelona", 41.3851, 2.1734),
    city("Vancouver", 49.2827, -123.1207),
    city("Rio de Janeiro", -22.9068, -43.1729),
    city("Amsterdam", 52.3676, 4.9041),
    city("Seoul", 37.5665, 126.9780),
    city("Melbourne", -37.8136, 144.9631),
    city("San Francisco", 37.7749, -122.4194),
    city("Istanbul", 41.0082, 28.9784),
    city("Berlin", 52.5200, 13.4050),
    city("Miami", 25.7617, -80.1918),
    city("Boston", 42.3601, -71.0589),
    city("Chicago", 41.8781, -87.6298),
    city("Los Angeles", 34.0522, -118.2437),
];

/// Where unmatched labels land (New York)
pub const FALLBACK_POSITION: LatLng = LatLng::new(40.7128, -74.0060);

/// A resolved, named position
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub position: LatLng,
}

impl From<&City> for Location {
    fn from(city: &City) -> Self {
        Self {
            name: city.name.to_string(),
            position: city.position,
        }
    }
}

/// What the host screen wants the map to show
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationTarget {
    /// Free-text place name, matched loosely against the table
    Label(String),
    /// Position in the rotation, wrapped onto the table
    Index(i64),
    #[default]
    Default,
}

impl LocationTarget {
    /// Pick a target the way screens pass it: a non-empty label wins over
    /// an index, and with neither the first city is used.
    pub fn choose(label: Option<&str>, index: Option<i64>) -> Self {
        match (label, index) {
            (Some(label), _) if !label.is_empty() => LocationTarget::Label(label.to_string()),
            (_, Some(index)) => LocationTarget::Index(index),
            _ => LocationTarget::Default,
        }
    }
}

/// Resolve a target to a location. Never fails.
pub fn resolve(target: &LocationTarget) -> Location {
    match target {
        LocationTarget::Label(label) => find_city(label),
        LocationTarget::Index(index) => city_at(*index),
        LocationTarget::Default => Location::from(&CITIES[0]),
    }
}

/// Case-insensitive substring match in either direction; first table
/// entry wins. Unknown labels keep their name at the fallback position.
pub fn find_city(label: &str) -> Location {
    let term = label.trim().to_lowercase();
    let found = CITIES.iter().find(|c| {
        let name = c.name.to_lowercase();
        name.contains(&term) || term.contains(&name)
    });

    match found {
        Some(city) => {
            tracing::debug!(label, city = city.name, "resolved city label");
            Location::from(city)
        }
        None => {
            tracing::debug!(label, "no city matched label, using fallback");
            Location {
                name: label.to_string(),
                position: FALLBACK_POSITION,
            }
        }
    }
}

/// Table entry at `index` modulo the table size
pub fn city_at(index: i64) -> Location {
    let len = CITIES.len() as i64;
    Location::from(&CITIES[index.rem_euclid(len) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_names_resolve_to_themselves() {
        for city in CITIES.iter() {
            let loc = find_city(city.name);
            assert_eq!(loc.name, city.name);
            assert_eq!(loc.position, city.position);
        }
    }

    #[test]
    fn test_partial_label_matches() {
        let loc = find_city("tok");
        assert_eq!(loc.name, "Tokyo");
        assert_eq!(loc.position, LatLng::new(35.6762, 139.6503));
    }

    #[test]
    fn test_label_containing_city_name() {
        assert_eq!(find_city("  Greater LONDON area ").name, "London");
    }

    #[test]
    fn test_first_match_wins() {
        // "an" is inside Vancouver, San Francisco and Los Angeles
        let loc = find_city("an");
        assert_eq!(loc.name, "Vancouver");
        let first = CITIES
            .iter()
            .find(|c| c.name.to_lowercase().contains("an"))
            .unwrap();
        assert_eq!(loc.name, first.name);
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let loc = find_city("Reykjavik");
        assert_eq!(loc.name, "Reykjavik");
        assert_eq!(loc.position, FALLBACK_POSITION);
    }

    #[test]
    fn test_empty_label_is_total() {
        let loc = find_city("");
        assert_eq!(loc.name, "Tokyo");
        let loc = find_city("   ");
        assert!(loc.position.is_finite());
    }

    #[test]
    fn test_index_is_cyclic() {
        let len = CITIES.len() as i64;
        for i in [-41, -20, -1, 0, 3, 19, 20, 57] {
            assert_eq!(city_at(i), city_at(i + len));
        }
        assert_eq!(city_at(20).name, "Tokyo");
        assert_eq!(city_at(-1).name, "Los Angeles");
    }

    #[test]
    fn test_resolve_default_is_first_city() {
        assert_eq!(resolve(&LocationTarget::Default).name, "Tokyo");
    }

    #[test]
    fn test_choose_prefers_label() {
        assert_eq!(
            LocationTarget::choose(Some("Paris"), Some(3)),
            LocationTarget::Label("Paris".to_string())
        );
        assert_eq!(
            LocationTarget::choose(Some(""), Some(3)),
            LocationTarget::Index(3)
        );
        assert_eq!(LocationTarget::choose(None, None), LocationTarget::Default);
    }
}
