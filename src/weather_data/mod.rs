pub mod error;
pub mod fetcher;
pub mod normalizer;
pub mod response_cache;
