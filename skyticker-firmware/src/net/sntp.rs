//! SNTP clock
//!
//! Keeps the last synchronized wall time together with the monotonic instant
//! it was taken at; `now()` extrapolates from there.

use defmt::*;
use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{IpEndpoint, Stack};
use embassy_time::{with_timeout, Duration, Instant};
use heapless::String;

use skyticker_core::config::MAX_HOST_LEN;
use skyticker_core::time::{ntp, UnixTime};
use skyticker_core::traits::{ClockSource, SyncError};

/// Local UDP port for the exchange
const LOCAL_PORT: u16 = 12_345;

/// Room for one reply plus an extension field
const RX_LEN: usize = 128;

pub struct SntpClock {
    stack: Stack<'static>,
    server: String<MAX_HOST_LEN>,
    timeout: Duration,
    synced: Option<(UnixTime, Instant)>,
}

impl SntpClock {
    pub fn new(stack: Stack<'static>, server: String<MAX_HOST_LEN>, timeout_ms: u32) -> Self {
        Self {
            stack,
            server,
            timeout: Duration::from_millis(timeout_ms as u64),
            synced: None,
        }
    }

    async fn exchange(&mut self) -> Result<UnixTime, SyncError> {
        if !self.stack.is_config_up() {
            return Err(SyncError::Network);
        }

        let addrs = self
            .stack
            .dns_query(self.server.as_str(), DnsQueryType::A)
            .await
            .map_err(|_| SyncError::Network)?;
        let addr = *addrs.first().ok_or(SyncError::Network)?;

        let mut rx_meta = [PacketMetadata::EMPTY; 2];
        let mut rx_buf = [0u8; RX_LEN];
        let mut tx_meta = [PacketMetadata::EMPTY; 2];
        let mut tx_buf = [0u8; ntp::PACKET_LEN];

        let mut socket = UdpSocket::new(
            self.stack,
            &mut rx_meta,
            &mut rx_buf,
            &mut tx_meta,
            &mut tx_buf,
        );
        socket.bind(LOCAL_PORT).map_err(|_| SyncError::Network)?;

        socket
            .send_to(&ntp::request(), IpEndpoint::new(addr, ntp::NTP_PORT))
            .await
            .map_err(|_| SyncError::Network)?;

        let mut reply = [0u8; RX_LEN];
        let (len, _from) = socket
            .recv_from(&mut reply)
            .await
            .map_err(|_| SyncError::BadResponse)?;

        ntp::parse_response(&reply[..len])
    }
}

impl ClockSource for SntpClock {
    async fn resync(&mut self) -> Result<(), SyncError> {
        let result = match with_timeout(self.timeout, self.exchange()).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Timeout),
        };

        let time = result?;
        debug!("SNTP time {}", time.as_secs());
        self.synced = Some((time, Instant::now()));
        Ok(())
    }

    fn now(&self) -> Option<UnixTime> {
        self.synced
            .map(|(time, at)| UnixTime(time.as_secs() + at.elapsed().as_secs() as i64))
    }

    fn uptime_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
