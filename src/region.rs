/// Regional bias policy for the weather simulator.
///
/// Certain regions are known to run wetter than the rest of the map. The
/// simulator asks a `RegionPolicy` which `BiasProfile` applies to a
/// coordinate and skews its condition and rainfall draws accordingly.
/// New regions are added to a `RegionRegistry` (in code or through
/// `floodroute.toml`) without touching the simulator.

use crate::model::Coordinate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Bias profiles
// ---------------------------------------------------------------------------

/// How the simulator should skew draws for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasProfile {
    /// Uniform condition draws, light recent rainfall.
    #[default]
    Standard,
    /// Conditions skewed toward rain, heavier recent rainfall.
    Wet,
}

/// Maps a coordinate to the bias profile the simulator should use.
pub trait RegionPolicy: Send + Sync {
    fn classify(&self, coordinate: Coordinate) -> BiasProfile;
}

// ---------------------------------------------------------------------------
// Bounding-box regions
// ---------------------------------------------------------------------------

/// A named rectangular region with open bounds on every side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BiasedRegion {
    pub name: String,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    #[serde(default = "default_region_profile")]
    pub profile: BiasProfile,
}

fn default_region_profile() -> BiasProfile {
    BiasProfile::Wet
}

impl BiasedRegion {
    /// Strict containment: a point on the boundary is outside.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.latitude > self.lat_min
            && coordinate.latitude < self.lat_max
            && coordinate.longitude > self.lon_min
            && coordinate.longitude < self.lon_max
    }

    /// Bounds must be finite and non-empty.
    pub fn is_well_formed(&self) -> bool {
        [self.lat_min, self.lat_max, self.lon_min, self.lon_max]
            .iter()
            .all(|v| v.is_finite())
            && self.lat_min < self.lat_max
            && self.lon_min < self.lon_max
    }
}

/// The Pacific Northwest box used as the default wet region.
pub fn pacific_northwest() -> BiasedRegion {
    BiasedRegion {
        name: "Pacific Northwest".to_string(),
        lat_min: 45.0,
        lat_max: 49.0,
        lon_min: -125.0,
        lon_max: -120.0,
        profile: BiasProfile::Wet,
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered list of regions; the first region containing a coordinate wins.
/// Coordinates outside every region get `BiasProfile::Standard`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRegistry {
    regions: Vec<BiasedRegion>,
}

impl RegionRegistry {
    pub fn new(regions: Vec<BiasedRegion>) -> Self {
        Self { regions }
    }

    /// A registry with no regions. Every coordinate is `Standard`.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn push(&mut self, region: BiasedRegion) {
        self.regions.push(region);
    }

    pub fn regions(&self) -> &[BiasedRegion] {
        &self.regions
    }

    /// Looks up the region containing a coordinate. Returns `None` if none does.
    pub fn find_region(&self, coordinate: Coordinate) -> Option<&BiasedRegion> {
        self.regions.iter().find(|r| r.contains(coordinate))
    }
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::new(vec![pacific_northwest()])
    }
}

impl RegionPolicy for RegionRegistry {
    fn classify(&self, coordinate: Coordinate) -> BiasProfile {
        self.find_region(coordinate)
            .map(|r| r.profile)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
