//! Backend file endpoints

pub mod http_store;

pub use http_store::HttpFileStore;
