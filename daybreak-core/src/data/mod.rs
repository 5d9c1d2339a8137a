//! Market data providers.
//!
//! The core pipeline consumes a fully-materialized, ordered bar
//! sequence; everything transient (network, rate limits, retries) stays
//! behind the [`BarProvider`] trait in this module.

pub mod binance;
pub mod provider;
pub mod synthetic;

pub use binance::BinanceProvider;
pub use provider::{BarProvider, DataError};
pub use synthetic::SyntheticProvider;
