//! Charge sites: geolocated points of interest with a privacy-preserving
//! public location.
//!
//! Each site stores its true coordinates plus an obfuscated copy drawn
//! within `MAX_OBFUSCATED_RADIUS` of them. Only the obfuscated copy is ever
//! returned.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/chargesites?lat&lon&latd&lond[&obf][&res][&pri]` | Sites around a viewport |
//! | GET | `/api/chargesites/params` | Region query policy for clients |
//! | GET | `/api/chargesites/{id}` | Get site by id |
//! | POST | `/api/chargesites` | Create site |
//! | PUT | `/api/chargesites/{id}` | Replace site |
//! | DELETE | `/api/chargesites/{id}` | Delete site |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;


pub use repositories::{ChargeSiteRepository, InMemoryChargeSiteRepository, PgChargeSiteRepository};
pub use services::ChargeSiteService;
