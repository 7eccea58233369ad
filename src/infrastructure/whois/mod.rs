//! WHOIS over TCP (RFC 3912).

mod parser;
mod tcp_client;

pub use parser::parse_response;
pub use tcp_client::TcpWhoisClient;
