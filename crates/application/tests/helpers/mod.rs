pub mod mock_backend;

pub use mock_backend::MockDnsBackend;
