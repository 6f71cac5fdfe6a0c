pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{Application, AppState};
