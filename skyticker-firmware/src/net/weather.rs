//! HTTPS weather source
//!
//! One GET per fetch against the current-conditions endpoint. The whole
//! round trip (DNS, TCP, TLS, headers and body) runs under a single timeout.

use core::fmt::Write;

use defmt::*;
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::TcpClient;
use embassy_net::Stack;
use embassy_rp::clocks::RoscRng;
use embassy_time::{with_timeout, Duration};
use heapless::String;
use rand_core::RngCore;
use reqwless::client::{HttpClient, TlsConfig, TlsVerify};
use reqwless::request::Method;

use skyticker_core::config::WeatherQuery;
use skyticker_core::time::TimeZone;
use skyticker_core::traits::{DataSource, FetchError};
use skyticker_core::weather::{RawReport, Snapshot};

/// Largest accepted response body
pub const MAX_BODY_LEN: usize = 2048;

/// Response headers plus body
const RX_LEN: usize = 4096;

/// Full request URL
const MAX_URL_LEN: usize = 320;

/// TLS record buffers
pub const TLS_READ_LEN: usize = 16_640;
pub const TLS_WRITE_LEN: usize = 4096;

pub type WeatherTcpClient = TcpClient<'static, 1, 1024, 1024>;

pub struct HttpWeatherSource {
    stack: Stack<'static>,
    tcp: &'static WeatherTcpClient,
    dns: DnsSocket<'static>,
    tls_read: &'static mut [u8; TLS_READ_LEN],
    tls_write: &'static mut [u8; TLS_WRITE_LEN],
    rx: [u8; RX_LEN],
    rng: RoscRng,
    zone: TimeZone,
    timeout: Duration,
}

impl HttpWeatherSource {
    pub fn new(
        stack: Stack<'static>,
        tcp: &'static WeatherTcpClient,
        tls_read: &'static mut [u8; TLS_READ_LEN],
        tls_write: &'static mut [u8; TLS_WRITE_LEN],
        zone: TimeZone,
        timeout_ms: u32,
    ) -> Self {
        Self {
            stack,
            tcp,
            dns: DnsSocket::new(stack),
            tls_read,
            tls_write,
            rx: [0; RX_LEN],
            rng: RoscRng,
            zone,
            timeout: Duration::from_millis(timeout_ms as u64),
        }
    }

    async fn request(&mut self, query: &WeatherQuery) -> Result<Snapshot, FetchError> {
        if !self.stack.is_config_up() {
            return Err(FetchError::Network);
        }

        let mut url: String<MAX_URL_LEN> = String::new();
        write!(url, "https://{}{}", query.host.as_str(), query.path()).map_err(|_| {
            warn!("Request URL exceeds {} bytes", MAX_URL_LEN);
            FetchError::Network
        })?;

        let tls = TlsConfig::new(
            self.rng.next_u64(),
            &mut self.tls_read[..],
            &mut self.tls_write[..],
            TlsVerify::None,
        );
        let mut client = HttpClient::new_with_tls(self.tcp, &self.dns, tls);

        let mut request = client.request(Method::GET, &url).await.map_err(|e| {
            warn!("Connect failed: {:?}", Debug2Format(&e));
            FetchError::Network
        })?;

        let response = request.send(&mut self.rx).await.map_err(|e| {
            warn!("Request failed: {:?}", Debug2Format(&e));
            FetchError::Network
        })?;

        if !response.status.is_successful() {
            return Err(FetchError::BadStatus(response.status.0));
        }

        let body = response.body().read_to_end().await.map_err(|e| match e {
            reqwless::Error::BufferTooSmall => FetchError::ParseError,
            _ => FetchError::Network,
        })?;

        if body.len() > MAX_BODY_LEN {
            warn!("Response body of {} bytes exceeds limit", body.len());
            return Err(FetchError::ParseError);
        }
        debug!("Received {} byte report", body.len());

        let (report, _) =
            serde_json_core::from_slice::<RawReport<'_>>(body).map_err(|_| FetchError::ParseError)?;

        Ok(report.into_snapshot(&self.zone)?)
    }
}

impl DataSource for HttpWeatherSource {
    async fn fetch(&mut self, query: &WeatherQuery) -> Result<Snapshot, FetchError> {
        match with_timeout(self.timeout, self.request(query)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        }
    }
}
