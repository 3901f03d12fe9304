/// Core domain types for caddyctl: validated labels, hosts, and upstreams.
use std::fmt;

use crate::error::Error;

/// Host name keying a site block. Only `[a-z0-9.-]+` is accepted so the
/// value can be written verbatim as the first token of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host(String);

impl Host {
    /// Borrow the host as a string slice.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }

    /// Validate a host name.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidHost` if the host is empty or contains anything
    /// other than lowercase ASCII letters, digits, `.` and `-`.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let valid = !raw.is_empty()
            && raw.bytes().all(|b| return matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-'));
        if !valid {
            return Err(Error::InvalidHost { host: raw.to_string() });
        }
        return Ok(Self(raw.to_string()));
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

/// Label naming one site file. Must be a single filename component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(String);

impl Label {
    /// Borrow the label as a string slice.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }

    /// Validate a label.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLabel` if the label is empty or contains a path
    /// separator, NUL, or any other control character.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let valid = !raw.is_empty()
            && !raw.chars().any(|c| return c == '/' || c == '\\' || c.is_control());
        if !valid {
            return Err(Error::InvalidLabel { label: raw.to_string() });
        }
        return Ok(Self(raw.to_string()));
    }
}

/// Backend address (`ip` or `ip:port`) a host is proxied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream(String);

impl Upstream {
    /// Borrow the upstream as a string slice.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }

    /// Validate an upstream address.
    ///
    /// Whitespace and braces are rejected: either would split the
    /// `reverse_proxy` line and make the duplicate scan capture a partial token.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUpstream` if the value is blank or contains
    /// whitespace, `{`, or `}`.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        if raw.trim().is_empty() {
            return Err(Error::InvalidUpstream {
                reason: "upstream is required (ex: 10.10.0.20 or 10.10.0.20:3002)",
                upstream: raw.to_string(),
            });
        }
        if raw.chars().any(|c| return c.is_whitespace() || c == '{' || c == '}') {
            return Err(Error::InvalidUpstream {
                reason: "must not contain whitespace or braces",
                upstream: raw.to_string(),
            });
        }
        return Ok(Self(raw.to_string()));
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_accepts_dns_like_names() {
        assert!(Host::parse("a.example.com").is_ok());
        assert!(Host::parse("api-2.internal").is_ok());
    }

    #[test]
    fn host_rejects_uppercase_and_wildcards() {
        assert!(matches!(Host::parse("A.example.com"), Err(Error::InvalidHost { .. })));
        assert!(matches!(Host::parse("*.example.com"), Err(Error::InvalidHost { .. })));
        assert!(matches!(Host::parse(""), Err(Error::InvalidHost { .. })));
    }

    #[test]
    fn label_rejects_separators_and_control_chars() {
        assert!(Label::parse("prod").is_ok());
        assert!(Label::parse("team sites.v2").is_ok());
        assert!(matches!(Label::parse("../etc"), Err(Error::InvalidLabel { .. })));
        assert!(matches!(Label::parse("a\\b"), Err(Error::InvalidLabel { .. })));
        assert!(matches!(Label::parse("bad\nname"), Err(Error::InvalidLabel { .. })));
        assert!(matches!(Label::parse(""), Err(Error::InvalidLabel { .. })));
    }

    #[test]
    fn upstream_rejects_blank_and_layout_breaking_values() {
        assert!(Upstream::parse("10.0.0.5:8080").is_ok());
        assert!(matches!(Upstream::parse("   "), Err(Error::InvalidUpstream { .. })));
        assert!(matches!(Upstream::parse("10.0.0.5 extra"), Err(Error::InvalidUpstream { .. })));
        assert!(matches!(Upstream::parse("10.0.0.5}"), Err(Error::InvalidUpstream { .. })));
    }
}
