pub mod doh;
#[cfg(feature = "system-dns")]
pub mod system;

pub use doh::{default_doh_client, DohQueryClient, DEFAULT_DOH_URL};
#[cfg(feature = "system-dns")]
pub use system::SystemDnsBackend;
