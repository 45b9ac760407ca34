//! Session identity, resolved once by the host at startup

use std::fmt;

/// Identifier of one engine instance's session, based on UUIDv7
///
/// No component stores this; the host resolves it once (from config or by
/// generating a fresh one) and tags its outputs with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u128);

impl SessionId {
    /// Generate a new UUIDv7-based SessionId
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_domain::SessionId;
    ///
    /// let id = SessionId::new();
    /// assert_eq!(id.to_string().len(), 36);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a SessionId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_domain::SessionId;
    ///
    /// let id = SessionId::new();
    /// let parsed = SessionId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid session id: {}", e))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_display_length() {
        assert_eq!(SessionId::new().to_string().len(), 36);
    }

    #[test]
    fn test_session_id_invalid_string() {
        assert!(SessionId::from_string("not-a-session").is_err());
        assert!(SessionId::from_string("").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Round-trip through string representation preserves ID
        #[test]
        fn test_session_string_roundtrip(value: u128) {
            let text = uuid::Uuid::from_u128(value).to_string();
            let id = SessionId::from_string(&text).map_err(TestCaseError::fail)?;
            prop_assert_eq!(id.to_string(), text);
        }
    }
}
