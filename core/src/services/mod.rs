//! Business services containing domain logic and use cases.

pub mod account;
pub mod media;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, ProfileUpdate, Registration};
pub use media::{MediaAsset, MediaStore, MediaUpload, MockMediaStore};
pub use token::{TokenConfig, TokenService};
