//! Length-prefixed JSON framing over stdio
//!
//! Wire format in both directions: a 4-byte native-endian unsigned length
//! followed by exactly that many bytes of UTF-8 JSON. Zero bytes at the
//! length position means the peer closed the channel cleanly; anything
//! shorter than a whole frame after that is an error. Generic over the
//! async IO traits so tests can drive in-memory streams.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::constants::protocol::MAX_MESSAGE_BYTES;
use crate::errors::{ProtocolError, ProtocolResult};

/// Read one framed message.
///
/// Returns `Ok(None)` on clean stream closure (end of stream before any
/// prefix byte).
pub async fn read_message<R, T>(reader: &mut R) -> ProtocolResult<Option<T>>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut prefix = [0u8; 4];
    let first = reader.read(&mut prefix).await?;
    if first == 0 {
        return Ok(None);
    }
    let mut filled = first;
    while filled < prefix.len() {
        let n = reader.read(&mut prefix[filled..]).await?;
        if n == 0 {
            return Err(ProtocolError::TruncatedPrefix);
        }
        filled += n;
    }

    let len = u32::from_ne_bytes(prefix);
    if len > MAX_MESSAGE_BYTES {
        return Err(ProtocolError::Oversized {
            len,
            limit: MAX_MESSAGE_BYTES,
        });
    }

    let mut payload = vec![0u8; len as usize];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => ProtocolError::TruncatedPayload {
                expected: len as usize,
            },
            _ => ProtocolError::Io(e),
        })?;

    let value = serde_json::from_slice(&payload)?;
    Ok(Some(value))
}

/// Write one framed message and flush.
pub async fn write_message<W, T>(writer: &mut W, message: &T) -> ProtocolResult<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_vec(message)?;
    let len = payload.len() as u32;
    writer.write_all(&len.to_ne_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}
