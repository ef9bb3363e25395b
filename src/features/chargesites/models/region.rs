use crate::features::chargesites::models::ChargeSite;
use crate::shared::geo::planar_distance;

/// Tri-state status filter: either no filtering at all, or only sites whose
/// flag equals the given value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Only(bool),
}

impl StatusFilter {
    pub fn matches(self, value: bool) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Only(expected) => expected == value,
        }
    }

    /// SQL bind form, where NULL means "no filter"
    pub fn as_option(self) -> Option<bool> {
        match self {
            StatusFilter::Any => None,
            StatusFilter::Only(expected) => Some(expected),
        }
    }
}

impl From<Option<bool>> for StatusFilter {
    fn from(value: Option<bool>) -> Self {
        value.map_or(StatusFilter::Any, StatusFilter::Only)
    }
}

/// Visible map region: center plus half extents, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Viewport {
    /// Radius to fetch around the center: `scale` times the larger delta
    pub fn max_distance(&self, query_distance_scale: f64) -> f64 {
        query_distance_scale * self.latitude_delta.max(self.longitude_delta)
    }
}

/// Resolved spatial query handed to the repository
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFilter {
    pub center_latitude: f64,
    pub center_longitude: f64,
    /// `max_distance` widened by the obfuscation radius so displaced sites
    /// near the edge are still returned
    pub search_radius: f64,
    pub obfuscated_status: StatusFilter,
    pub reserved_status: StatusFilter,
    pub private_status: StatusFilter,
}

impl RegionFilter {
    pub fn new(viewport: Viewport, query_distance_scale: f64, max_obfuscated_radius: f64) -> Self {
        Self {
            center_latitude: viewport.latitude,
            center_longitude: viewport.longitude,
            search_radius: viewport.max_distance(query_distance_scale) + max_obfuscated_radius,
            obfuscated_status: StatusFilter::Any,
            reserved_status: StatusFilter::Any,
            private_status: StatusFilter::Any,
        }
    }

    pub fn with_statuses(
        mut self,
        obfuscated_status: StatusFilter,
        reserved_status: StatusFilter,
        private_status: StatusFilter,
    ) -> Self {
        self.obfuscated_status = obfuscated_status;
        self.reserved_status = reserved_status;
        self.private_status = private_status;
        self
    }

    /// Same predicate the SQL query applies: planar distance on the raw
    /// obfuscated coordinates, then each status filter that is set.
    pub fn matches(&self, site: &ChargeSite) -> bool {
        planar_distance(
            self.center_latitude,
            self.center_longitude,
            site.obfuscated_latitude,
            site.obfuscated_longitude,
        ) <= self.search_radius
            && self.obfuscated_status.matches(site.obfuscated_status)
            && self.reserved_status.matches(site.reserved_status)
            && self.private_status.matches(site.private_status)
    }
}
