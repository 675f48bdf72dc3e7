pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{get_bearer_token, JwtService};
pub use models::{AuthUser, Claims};
