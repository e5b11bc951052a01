//! Synchronous network availability checks.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;
use url::{Host, Url};

/// Answers whether a network path is currently available or being established.
pub trait Connectivity: Send + Sync {
    fn is_available(&self) -> bool;
}

/// Connectivity state pushed in by the host environment.
///
/// Front ends that receive OS network-change events flip this flag; tests use
/// it to simulate going offline.
#[derive(Debug)]
pub struct ConnectivityFlag {
    available: AtomicBool,
}

impl ConnectivityFlag {
    #[must_use]
    pub fn new(available: bool) -> Self {
        Self {
            available: AtomicBool::new(available),
        }
    }

    #[must_use]
    pub fn online() -> Self {
        Self::new(true)
    }

    #[must_use]
    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::online()
    }
}

impl Connectivity for ConnectivityFlag {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

/// Address used only for a route lookup; nothing is ever sent to it.
const ROUTE_PROBE_ADDR: SocketAddr = SocketAddr::new(
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    53,
);

/// Checks whether the OS has a route toward the public internet.
///
/// Connecting a UDP socket only asks the kernel to pick a route and local
/// address; no packet leaves the host. A machine with no usable interface
/// fails with "network unreachable".
#[derive(Debug, Clone, Copy)]
pub struct RouteConnectivity {
    probe: SocketAddr,
}

impl Default for RouteConnectivity {
    fn default() -> Self {
        Self {
            probe: ROUTE_PROBE_ADDR,
        }
    }
}

impl RouteConnectivity {
    /// Probes a different address (e.g. a private catalog mirror).
    #[must_use]
    pub fn with_probe(probe: SocketAddr) -> Self {
        Self { probe }
    }

    /// Probes the catalog host itself when it is an IP literal, otherwise the
    /// default public address. Name hosts are not resolved here.
    #[must_use]
    pub fn for_catalog_url(catalog_url: &str) -> Self {
        let Ok(parsed) = Url::parse(catalog_url) else {
            return Self::default();
        };
        let port = parsed.port_or_known_default().unwrap_or(80);
        match parsed.host() {
            Some(Host::Ipv4(ip)) => Self::with_probe(SocketAddr::new(IpAddr::V4(ip), port)),
            Some(Host::Ipv6(ip)) => Self::with_probe(SocketAddr::new(IpAddr::V6(ip), port)),
            Some(Host::Domain(_)) | None => Self::default(),
        }
    }
}

impl Connectivity for RouteConnectivity {
    fn is_available(&self) -> bool {
        let bind_addr: SocketAddr = if self.probe.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let result = UdpSocket::bind(bind_addr).and_then(|socket| socket.connect(self.probe));
        if let Err(error) = &result {
            debug!(probe = %self.probe, error = %error, "No network route available");
        }
        result.is_ok()
    }
}
