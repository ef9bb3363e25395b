pub mod charge_site_handler;

pub use charge_site_handler::*;
