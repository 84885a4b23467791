pub mod claims;
pub mod clock;
pub mod credentials;
pub mod error;
pub mod header;
pub mod identity;
pub mod password;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::CredentialStore;
pub use error::AuthError;
pub use header::{authenticate, bearer_token};
pub use identity::Identity;
pub use password::PasswordHasher;
pub use token::{
    IssuedToken, SigningError, TokenError, TokenIssuer, TokenService, TokenValidator,
    DEFAULT_TOKEN_TTL,
};
