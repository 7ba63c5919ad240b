//! Credential authority adapters.
//!
//! Implementations of the `CredentialAuthority` port:
//!
//! - `supabase` - production GoTrue REST adapter
//! - `mock` - in-memory authority with call counters for tests

mod mock;
mod supabase;

pub use mock::MockCredentialAuthority;
pub use supabase::{SupabaseAuthority, SupabaseConfig};
