//! # faircoin-network
//!
//! Wire envelope framing and typed peer messages for the FairCoin client.
//!
//! Every peer message is framed as
//! `magic(4) || command(12, NUL-padded ASCII) || length(u32 LE) ||
//! checksum(4) || payload`, the checksum being the first four bytes of
//! double-SHA-256 over the payload. The framer here accepts byte buffers,
//! not sockets; transport and peer management live elsewhere.

mod addr;
mod error;
mod framing;
mod message;
mod nonce_pool;

pub use addr::{AddressMessage, PeerAddress};
pub use error::{NetworkError, NetworkResult};
pub use framing::{MessageSerializer, PacketHeader, ENVELOPE_HEADER_SIZE};
pub use message::{Command, HeadersMessage, Message, UnknownMessage};
pub use nonce_pool::NoncePoolMessage;
