// src/lib.rs

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod mock_catalog;
pub mod model;
pub mod selection;
pub mod targeting;

pub use error::{PredicateFailure, SelectionError};
pub use model::{AdvertisementContent, GeneratedAdvertisement, RequestContext};
pub use selection::SelectionEngine;
