pub mod api_response;
pub mod endpoints;
