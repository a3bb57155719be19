mod extractor;
mod token;

pub use extractor::Authenticated;
#[cfg(test)]
pub(crate) use token::sign;
pub use token::{AuthError, Claims, TokenVerifier};
