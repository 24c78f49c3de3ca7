mod ip_api_lookup;

pub use ip_api_lookup::{IpApiConfig, IpApiLookupService, DEFAULT_ENDPOINT_URL, DEFAULT_FIELDS};
