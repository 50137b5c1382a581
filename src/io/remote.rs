/// Error type for the content-addressed store
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("malformed skylink: {0:?}")]
    InvalidSkylink(String),
    #[error("nothing stored under {0}")]
    NotFound(String),
    #[error("content stored under {0} does not match its skylink")]
    Corrupt(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A content-addressed blob store: publish bytes, get a skylink back;
/// fetch a skylink, get the same bytes.
///
/// Calls block until done. There is no retry here; callers decide.
pub trait RemoteStore {
    fn fetch(&self, skylink: &str) -> Result<Vec<u8>, GatewayError>;

    fn publish(&self, bytes: &[u8]) -> Result<String, GatewayError>;
}

impl<T: RemoteStore + ?Sized> RemoteStore for &T {
    fn fetch(&self, skylink: &str) -> Result<Vec<u8>, GatewayError> {
        (**self).fetch(skylink)
    }

    fn publish(&self, bytes: &[u8]) -> Result<String, GatewayError> {
        (**self).publish(bytes)
    }
}

/// Length of a skylink: hex-encoded BLAKE3 digest
pub const SKYLINK_LEN: usize = 64;

/// The skylink for a blob: lowercase hex BLAKE3 of its bytes
pub fn content_address(bytes: &[u8]) -> String {
    hex::encode(blake3::hash(bytes).as_bytes())
}

/// Whether `skylink` has the shape produced by [`content_address`]
pub fn is_valid_skylink(skylink: &str) -> bool {
    skylink.len() == SKYLINK_LEN
        && skylink
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
