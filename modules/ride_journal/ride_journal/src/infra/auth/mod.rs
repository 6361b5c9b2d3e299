//! Bearer-token identity and credential hashing.

mod jwt;
pub mod password;

pub use jwt::{Claims, JwtIdentityResolver};
