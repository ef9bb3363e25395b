pub mod charge_site_dto;

pub use charge_site_dto::{
    ChargeSiteRequestDto, ChargeSiteResponseDto, QueryPolicyResponseDto, RegionQueryParams,
};
