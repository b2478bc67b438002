//! Handle validation utilities.
//!
//! A handle is the display name a client claims with `HELLO-FROM`. It is a
//! single non-empty token that contains none of the reserved characters.

/// Characters that may not appear anywhere in a handle.
///
/// The comma is reserved because `LIST-OK` joins handles with it, the space
/// because it separates protocol fields.
pub const ILLEGAL_HANDLE_CHARS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*', ',', ' '];

/// Extension trait for checking if a string is an acceptable handle.
pub trait HandleExt {
    /// Check if this string is a valid handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use relay_proto::HandleExt;
    ///
    /// assert!("alice".is_valid_handle());
    /// assert!("bob_42".is_valid_handle());
    ///
    /// assert!(!"".is_valid_handle());
    /// assert!(!"al#ice".is_valid_handle());
    /// assert!(!"two words".is_valid_handle());
    /// ```
    fn is_valid_handle(&self) -> bool;
}

impl HandleExt for &str {
    fn is_valid_handle(&self) -> bool {
        !self.is_empty()
            && !self
                .chars()
                .any(|c| ILLEGAL_HANDLE_CHARS.contains(&c) || c.is_control())
    }
}

impl HandleExt for String {
    fn is_valid_handle(&self) -> bool {
        self.as_str().is_valid_handle()
    }
}
