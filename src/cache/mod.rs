pub mod route_cache;

pub use route_cache::RouteCache;
