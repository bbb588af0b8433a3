//! Authentication domain: user, tokens, backend contract and the shared
//! bearer-token slot.

mod api;
mod model;
mod token;

pub use api::AuthApi;
pub use model::{AuthTokens, Credentials, Registration, User};
pub use token::TokenHandle;
