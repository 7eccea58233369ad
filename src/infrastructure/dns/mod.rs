//! DNS resolution backed by `hickory-resolver`.

mod hickory_resolver;

pub use hickory_resolver::HickoryDnsResolver;
