//! # Feature: Network Lookups
//!
//! Encyclopedia summaries and current weather over HTTP.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true (weather requires an API key)
//!
//! ## Changelog
//! - 1.1.0: Weather lookups
//! - 1.0.0: Wikipedia summaries

pub mod encyclopedia;
pub mod weather;

pub use encyclopedia::{Encyclopedia, WikipediaClient};
pub use weather::{OpenWeatherClient, WeatherReport, WeatherService};
