//! Connection target with secret redaction
//!
//! Targets show up in errors and logs, so `Display` and `Debug` never print
//! the password. `as_str` returns the raw value for the driver.

use crate::constants::REDACTED_SECRET;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Database URL or key/value DSN the lock session dials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionTarget(String);

impl ConnectionTarget {
    /// Wrap a URL or DSN
    pub fn new<S: Into<String>>(target: S) -> Self {
        Self(target.into())
    }

    /// Raw target, secrets included
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the target is blank
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Target with any password replaced by a placeholder
    pub fn redacted(&self) -> String {
        let raw = self.0.as_str();
        match raw.find("://") {
            Some(scheme_end) => redact_url(raw, scheme_end + 3),
            None => redact_key_value(raw),
        }
    }
}

fn redact_url(raw: &str, authority_start: usize) -> String {
    let rest = &raw[authority_start..];
    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..authority_start]);
    match authority.rfind('@') {
        Some(at) => {
            let userinfo = &authority[..at];
            match userinfo.split_once(':') {
                Some((user, _)) => {
                    out.push_str(user);
                    out.push(':');
                    out.push_str(REDACTED_SECRET);
                }
                None => out.push_str(userinfo),
            }
            out.push_str(&authority[at..]);
        }
        None => out.push_str(authority),
    }

    let tail = &rest[authority_end..];
    match tail.split_once('?') {
        Some((path, query)) => {
            out.push_str(path);
            out.push('?');
            let params: Vec<String> = query
                .split('&')
                .map(|param| match param.split_once('=') {
                    Some((key, _)) if key.eq_ignore_ascii_case("password") => {
                        format!("{key}={REDACTED_SECRET}")
                    }
                    _ => param.to_string(),
                })
                .collect();
            out.push_str(&params.join("&"));
        }
        None => out.push_str(tail),
    }
    out
}

/// Redact a libpq-style `key=value` string.
///
/// Tokenized like the driver does: whitespace may surround `=`, and a value
/// is either `'quoted'` (with `\'` escapes) or runs to the next whitespace.
fn redact_key_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    loop {
        let trimmed = rest.trim_start();
        out.push_str(&rest[..rest.len() - trimmed.len()]);
        rest = trimmed;
        if rest.is_empty() {
            return out;
        }

        let key_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let key = &rest[..key_end];
        out.push_str(key);
        rest = &rest[key_end..];

        let Some(after_eq) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let value = after_eq.trim_start();
        out.push_str(&rest[..rest.len() - value.len()]);

        let value_len = key_value_len(value);
        if key.eq_ignore_ascii_case("password") {
            out.push_str(REDACTED_SECRET);
        } else {
            out.push_str(&value[..value_len]);
        }
        rest = &value[value_len..];
    }
}

/// Byte length of the value at the start of `s`
fn key_value_len(s: &str) -> usize {
    let quoted = s.starts_with('\'');
    let mut chars = s.char_indices().skip(usize::from(quoted));
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\'' if quoted => return i + 1,
            c if !quoted && c.is_whitespace() => return i,
            _ => {}
        }
    }
    s.len()
}

impl From<&str> for ConnectionTarget {
    fn from(target: &str) -> Self {
        Self::new(target)
    }
}

impl From<String> for ConnectionTarget {
    fn from(target: String) -> Self {
        Self(target)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionTarget")
            .field(&self.redacted())
            .finish()
    }
}
