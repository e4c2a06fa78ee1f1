pub mod cataas;

pub use cataas::CataasProvider;
