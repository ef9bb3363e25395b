mod charge_site;
mod region;

pub use charge_site::{ChargeSite, NewChargeSite};
pub use region::{RegionFilter, StatusFilter, Viewport};
