pub mod alerts;
pub mod analysis;
pub mod trends;
pub mod upload;
