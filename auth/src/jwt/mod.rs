pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;

pub use claims::TokenClaims;
pub use claims::TokenKind;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use issuer::TokenIssuer;
pub use issuer::TokenLifetimes;
pub use issuer::TokenPair;
