use utoipa::{Modify, OpenApi};

use crate::features::chargesites::{dtos as chargesites_dtos, handlers as chargesites_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Charge sites
        chargesites_handlers::list_charge_sites,
        chargesites_handlers::get_query_policy,
        chargesites_handlers::get_charge_site,
        chargesites_handlers::create_charge_site,
        chargesites_handlers::update_charge_site,
        chargesites_handlers::delete_charge_site,
    ),
    components(
        schemas(
            chargesites_dtos::ChargeSiteRequestDto,
            chargesites_dtos::ChargeSiteResponseDto,
            chargesites_dtos::QueryPolicyResponseDto,
        )
    ),
    tags(
        (name = "chargesites", description = "Charge sites and region search"),
    ),
    info(
        title = "Charge Sites API",
        version = "0.1.0",
        description = "Charge site map backend",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
