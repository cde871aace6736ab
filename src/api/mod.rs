pub mod error;
pub mod format;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
