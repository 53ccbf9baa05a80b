mod claims;
mod store;

pub use claims::{decode, Claims, DecodeError};
pub use store::{KeyringTokenStore, MemoryTokenStore, StoreError, TokenStore};
