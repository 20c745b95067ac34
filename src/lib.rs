// Client-side core of the Arena e-sports platform: typed API client,
// session/token management, rank model, route guarding, and the polling
// helper behind the live views.

pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod poll;
pub mod rank;
pub mod session;
pub mod store;
pub mod view;

pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, StoreError};
pub use rank::Categoria;
pub use session::{SessionManager, SessionState};
pub use store::TokenVault;
