//! TLS certificate probing.
//!
//! [`CertificateProbe`] is the seam the SSL check talks to; [`RustlsProbe`]
//! performs a real handshake against the public web PKI and reads the leaf
//! certificate's `NotAfter`.

use chrono::{DateTime, Utc};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore};
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::error::{Result, ShipcheckError};

/// Connect and read timeout for the handshake.
pub const TLS_TIMEOUT: Duration = Duration::from_secs(5);

/// What the handshake revealed about the leaf certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateExpiry {
    /// Certificate is valid until this instant.
    NotAfter(DateTime<Utc>),
    /// Handshake rejected the certificate as already expired.
    Expired,
    /// Server answered but its certificate failed verification for another
    /// reason (unknown issuer, name mismatch, revoked).
    Rejected(String),
}

/// Reads certificate expiry for a host.
pub trait CertificateProbe: Send + Sync {
    fn expiry(&self, host: &str, port: u16) -> Result<CertificateExpiry>;
}

/// Handshake-based probe using rustls with the Mozilla root set.
#[derive(Debug, Clone)]
pub struct RustlsProbe {
    timeout: Duration,
}

impl RustlsProbe {
    pub fn new() -> Self {
        Self::with_timeout(TLS_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client_config(&self, host: &str) -> Result<Arc<ClientConfig>> {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| tls_error(host, e))?
            .with_root_certificates(roots)
            .with_no_client_auth();
        Ok(Arc::new(config))
    }
}

impl Default for RustlsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateProbe for RustlsProbe {
    fn expiry(&self, host: &str, port: u16) -> Result<CertificateExpiry> {
        let config = self.client_config(host)?;
        let server_name = ServerName::try_from(host.to_string()).map_err(|e| tls_error(host, e))?;
        let mut conn = ClientConnection::new(config, server_name).map_err(|e| tls_error(host, e))?;

        let addr = resolve(host, port, self.timeout)?;
        let mut sock = TcpStream::connect_timeout(&addr, self.timeout)?;
        sock.set_read_timeout(Some(self.timeout))?;
        sock.set_write_timeout(Some(self.timeout))?;

        while conn.is_handshaking() {
            if let Err(e) = conn.complete_io(&mut sock) {
                return match rejected_certificate(&e) {
                    Some(rustls::CertificateError::Expired) => {
                        tracing::debug!("Certificate for {host} rejected as expired");
                        Ok(CertificateExpiry::Expired)
                    }
                    Some(reason) => {
                        tracing::debug!("Certificate for {host} rejected: {reason}");
                        Ok(CertificateExpiry::Rejected(reason.to_string()))
                    }
                    None => Err(tls_error(host, &e)),
                };
            }
        }

        let leaf = conn
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or_else(|| tls_error(host, "server sent no certificate"))?;
        let (_, cert) =
            x509_parser::parse_x509_certificate(leaf.as_ref()).map_err(|e| tls_error(host, e))?;

        let not_after = cert.validity().not_after.timestamp();
        DateTime::from_timestamp(not_after, 0)
            .map(CertificateExpiry::NotAfter)
            .ok_or_else(|| tls_error(host, "certificate NotAfter out of range"))
    }
}

fn tls_error(host: &str, err: impl std::fmt::Display) -> ShipcheckError {
    ShipcheckError::Tls {
        host: host.to_string(),
        message: err.to_string(),
    }
}

/// Resolve `host` on a helper thread so a stalled lookup cannot outlast
/// `timeout`.
fn resolve(host: &str, port: u16, timeout: Duration) -> Result<SocketAddr> {
    let (tx, rx) = mpsc::channel();
    let target = (host.to_string(), port);
    thread::spawn(move || {
        let addr = target
            .to_socket_addrs()
            .map(|mut addrs| addrs.next());
        let _ = tx.send(addr);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(Some(addr))) => Ok(addr),
        Ok(Ok(None)) => Err(tls_error(host, "no address resolved")),
        Ok(Err(e)) => Err(tls_error(host, format!("lookup failed: {e}"))),
        Err(_) => Err(tls_error(host, "lookup timed out")),
    }
}

/// The certificate verification failure behind a handshake error, if any.
fn rejected_certificate(err: &io::Error) -> Option<&rustls::CertificateError> {
    match err.get_ref()?.downcast_ref::<rustls::Error>()? {
        rustls::Error::InvalidCertificate(cert) => Some(cert),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_builds_with_ring() {
        assert!(RustlsProbe::new().client_config("example.com").is_ok());
    }

    #[test]
    fn invalid_server_name_is_tls_error() {
        let err = RustlsProbe::new().expiry("not a host", 443).unwrap_err();
        assert!(matches!(err, ShipcheckError::Tls { .. }));
    }

    fn handshake_error(err: rustls::Error) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }

    #[test]
    fn certificate_failures_are_recognized() {
        let expired = handshake_error(rustls::Error::InvalidCertificate(
            rustls::CertificateError::Expired,
        ));
        assert_eq!(
            rejected_certificate(&expired),
            Some(&rustls::CertificateError::Expired)
        );

        let unknown = handshake_error(rustls::Error::InvalidCertificate(
            rustls::CertificateError::UnknownIssuer,
        ));
        assert_eq!(
            rejected_certificate(&unknown),
            Some(&rustls::CertificateError::UnknownIssuer)
        );
    }

    #[test]
    fn transport_failures_are_not_certificate_failures() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(rejected_certificate(&refused).is_none());

        let protocol = handshake_error(rustls::Error::HandshakeNotComplete);
        assert!(rejected_certificate(&protocol).is_none());
    }

    #[test]
    fn localhost_resolves_within_timeout() {
        let addr = resolve("localhost", 443, TLS_TIMEOUT).unwrap();
        assert_eq!(addr.port(), 443);
    }
}
