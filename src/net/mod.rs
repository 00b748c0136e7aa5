//! Outbound network access for live probes.

pub mod http;
pub mod tls;

pub use http::{
    apex_host, build_client, join_path, parse_site_url, www_variants, CHECK_TIMEOUT, USER_AGENT,
};
pub use tls::{CertificateExpiry, CertificateProbe, RustlsProbe, TLS_TIMEOUT};
