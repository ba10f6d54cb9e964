use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const HTTP_METHOD_COUNT: usize = 7;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Patch = 4,
    Head = 5,
    Options = 6,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; HTTP_METHOD_COUNT] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn mask(self) -> MethodSet {
        MethodSet::from_bits_truncate(1 << (self as u8))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported http method token '{token}'")]
pub struct MethodParseError {
    pub token: String,
}

/// Method tokens are case-sensitive (RFC 9110 §9.1).
impl FromStr for HttpMethod {
    type Err = MethodParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == token)
            .ok_or_else(|| MethodParseError {
                token: token.to_string(),
            })
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodSet: u8 {
        const GET = 0b0000_0001;
        const POST = 0b0000_0010;
        const PUT = 0b0000_0100;
        const DELETE = 0b0000_1000;
        const PATCH = 0b0001_0000;
        const HEAD = 0b0010_0000;
        const OPTIONS = 0b0100_0000;
    }
}

impl MethodSet {
    pub fn methods(self) -> impl Iterator<Item = HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .filter(move |method| self.contains(method.mask()))
    }

    /// Renders the set as the value of an `Allow` response header.
    pub fn to_allow_header(self) -> String {
        self.methods()
            .map(HttpMethod::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<HttpMethod> for MethodSet {
    fn from(method: HttpMethod) -> Self {
        method.mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_upper_case_tokens_only() {
        assert_eq!("GET".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("OPTIONS".parse::<HttpMethod>(), Ok(HttpMethod::Options));

        let err = "get".parse::<HttpMethod>().expect_err("lower case is rejected");
        assert_eq!(err.token, "get");
        assert!("TRACE".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn mask_bits_line_up_with_flag_constants() {
        assert_eq!(HttpMethod::Get.mask(), MethodSet::GET);
        assert_eq!(HttpMethod::Post.mask(), MethodSet::POST);
        assert_eq!(HttpMethod::Head.mask(), MethodSet::HEAD);
        assert_eq!(HttpMethod::Options.mask(), MethodSet::OPTIONS);
    }

    #[test]
    fn allow_header_lists_methods_in_declaration_order() {
        let set = MethodSet::POST | MethodSet::GET | MethodSet::HEAD;
        assert_eq!(set.to_allow_header(), "GET, POST, HEAD");
        assert_eq!(MethodSet::empty().to_allow_header(), "");
    }

    #[test]
    fn serde_uses_method_tokens() {
        let json = serde_json::to_string(&HttpMethod::Delete).expect("serialize");
        assert_eq!(json, "\"DELETE\"");
        let back: HttpMethod = serde_json::from_str("\"PATCH\"").expect("deserialize");
        assert_eq!(back, HttpMethod::Patch);
    }
}
