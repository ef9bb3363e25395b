mod charge_site_service;

pub use charge_site_service::ChargeSiteService;
