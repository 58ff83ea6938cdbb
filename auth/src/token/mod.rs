pub mod claims;
pub mod codec;
pub mod errors;
mod header;

pub use claims::Claims;
pub use claims::ISSUER;
pub use codec::IssuedToken;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use header::SIGNING_ALGORITHM;
