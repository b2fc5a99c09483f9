pub mod cloud_eval;
pub mod config;
pub mod error;
pub mod export;
pub mod opening_names;
pub mod position_counter;
