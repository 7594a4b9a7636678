//! Core library for the `weathernow` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and the traits behind it
//! - Device location detection
//! - The weather view state machine shared by every frontend
//!
//! It is used by `weathernow-cli`, but can also be reused by other binaries
//! or services.

pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod view;

pub use client::{OpenWeatherClient, WeatherSource};
pub use config::Config;
pub use error::{FetchError, LocationError, ViewError};
pub use location::{IpLocator, LocationSource};
pub use model::{Coordinates, WeatherSnapshot};
pub use view::{Phase, WeatherView};
