pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod normalize;
pub mod rank;
pub mod report;
pub mod source;
