//! Client-side query cache.
//!
//! Reads are cached by [`QueryKey`] with no background refetching; the only
//! way an entry goes away is a [`Mutation`] that declares it stale, or
//! [`QueryCache::clear`] at the end of a session.

mod key;
mod mutation;
mod store;

pub use key::QueryKey;
pub use mutation::{Invalidation, Mutation};
pub use store::QueryCache;
