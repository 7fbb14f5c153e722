//! SNTP packet encoding
//!
//! Only the client request and the transmit timestamp of the reply are
//! used. Round-trip delay is not compensated.

use super::UnixTime;
use crate::traits::SyncError;

/// SNTP server port
pub const NTP_PORT: u16 = 123;

/// Request and minimum response length
pub const PACKET_LEN: usize = 48;

/// LI = 0, VN = 3, Mode = 3 (client)
const CLIENT_HEADER: u8 = 0x1B;

const MODE_MASK: u8 = 0x07;
const MODE_SERVER: u8 = 4;
const TRANSMIT_OFFSET: usize = 40;

/// Build a client request
pub fn request() -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    packet[0] = CLIENT_HEADER;
    packet
}

/// Extract the server transmit time from a reply
pub fn parse_response(packet: &[u8]) -> Result<UnixTime, SyncError> {
    if packet.len() < PACKET_LEN {
        return Err(SyncError::BadResponse);
    }
    if packet[0] & MODE_MASK != MODE_SERVER {
        return Err(SyncError::BadResponse);
    }

    let secs = u32::from_be_bytes([
        packet[TRANSMIT_OFFSET],
        packet[TRANSMIT_OFFSET + 1],
        packet[TRANSMIT_OFFSET + 2],
        packet[TRANSMIT_OFFSET + 3],
    ]);
    // Kiss-o'-death and unsynchronized servers send zero
    if secs == 0 {
        return Err(SyncError::BadResponse);
    }
    Ok(UnixTime::from_ntp_seconds(secs))
}
