pub mod auth;
pub mod client;
pub mod generation;

pub use auth::{CachedToken, ClientCredentials, TokenProvider};
pub use client::{OpenFoodFactsClient, ProductResult, SearchError};
pub use generation::RequestGeneration;
