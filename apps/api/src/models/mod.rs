pub mod analysis;
pub mod knowledge;
