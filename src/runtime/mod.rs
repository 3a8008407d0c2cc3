pub mod lifetime;
pub mod seed;
