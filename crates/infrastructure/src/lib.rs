//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_features_api;
mod http_roles_api_client;
mod http_spaces_content_api;
mod in_memory_features_api;
mod in_memory_roles_api_client;
mod in_memory_spaces_content_api;
mod kibana_http_client;

pub use http_features_api::HttpFeaturesApi;
pub use http_roles_api_client::{HttpRolesApiClient, HttpRolesApiClientProvider};
pub use http_spaces_content_api::HttpSpacesContentApi;
pub use in_memory_features_api::InMemoryFeaturesApi;
pub use in_memory_roles_api_client::{InMemoryRolesApiClient, InMemoryRolesApiClientProvider};
pub use in_memory_spaces_content_api::InMemorySpacesContentApi;
pub use kibana_http_client::{KibanaClientConfig, KibanaHttpClient};
