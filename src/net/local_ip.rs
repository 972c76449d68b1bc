//! LAN address discovery for the startup announcement.

use std::net::{IpAddr, Ipv4Addr};
use tokio::net::UdpSocket;

/// Non-routable probe target. "Connecting" a UDP socket sends nothing; it
/// only makes the OS pick the outbound interface.
const PROBE_TARGET: &str = "10.255.255.255:1";

/// The address other devices on the network can reach this host at.
///
/// Falls back to loopback when no interface routes to the probe target.
pub async fn discover() -> IpAddr {
    match probe().await {
        Ok(ip) if !ip.is_unspecified() => ip,
        Ok(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        Err(e) => {
            tracing::debug!(error = %e, "Local IP discovery failed, using loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

async fn probe() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.connect(PROBE_TARGET).await?;
    Ok(socket.local_addr()?.ip())
}
