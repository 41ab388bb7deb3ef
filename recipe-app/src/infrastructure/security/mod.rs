mod input_sanitizer;
mod password_hasher;
mod token_signer;

pub use input_sanitizer::InputSanitizer;
pub use password_hasher::CredentialHasher;
pub use token_signer::{IssuedToken, TokenError, TokenSigner, MIN_SECRET_LEN};
