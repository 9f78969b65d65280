pub mod config;
pub mod detect;
pub mod serve;
pub mod transform;
