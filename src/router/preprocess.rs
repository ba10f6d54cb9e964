use crate::path::{PathError, PathResult};
use crate::router::RouterOptions;
use memchr::memchr2;

#[derive(Debug, Clone)]
pub struct PreprocessOutcome {
    original: String,
    normalized: String,
}

impl PreprocessOutcome {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn into_normalized(self) -> String {
        self.normalized
    }
}

#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: RouterOptions,
    mount: Option<Box<str>>,
}

impl Preprocessor {
    pub fn new(config: RouterOptions) -> PathResult<Self> {
        let mount = match config.mount_path.as_deref() {
            Some(raw) => {
                let mut normalized = apply(raw, &config)?.into_normalized();
                trim_trailing_slashes(&mut normalized);
                (normalized != "/").then(|| normalized.into_boxed_str())
            }
            None => None,
        };

        Ok(Self { config, mount })
    }

    pub fn config(&self) -> &RouterOptions {
        &self.config
    }

    pub fn mount(&self) -> Option<&str> {
        self.mount.as_deref()
    }

    pub fn apply(&self, path: &str) -> PathResult<PreprocessOutcome> {
        apply(path, &self.config)
    }

    /// `Ok(None)` when the target lies outside the mount prefix.
    pub fn resolve_request(&self, target: &str) -> PathResult<Option<String>> {
        let path = strip_query_and_fragment(target);
        let normalized = apply(path, &self.config)?.into_normalized();

        Ok(match self.mount.as_deref() {
            Some(mount) => strip_mount(&normalized, mount),
            None => Some(normalized),
        })
    }
}

pub fn apply(path: &str, config: &RouterOptions) -> PathResult<PreprocessOutcome> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let mut working = if config.decode_uri {
        decode_percent(path)?
    } else {
        path.to_string()
    };

    if !config.case_sensitive {
        working.make_ascii_lowercase();
    }

    validate_characters(&working, path)?;

    let normalized = if config.normalize_path {
        normalize(&working, config)
    } else {
        working
    };

    if contains_parent_traversal(&normalized) {
        return Err(PathError::InvalidParentTraversal {
            input: path.to_string(),
            normalized,
        });
    }

    Ok(PreprocessOutcome {
        original: path.to_string(),
        normalized,
    })
}

fn strip_query_and_fragment(target: &str) -> &str {
    match memchr2(b'?', b'#', target.as_bytes()) {
        Some(pos) => &target[..pos],
        None => target,
    }
}

fn strip_mount(path: &str, mount: &str) -> Option<String> {
    let rest = path.strip_prefix(mount)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        // "/apiv2" is not inside "/api"
        None
    }
}

fn decode_percent(input: &str) -> PathResult<String> {
    let bytes = input.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if i + 2 >= bytes.len() {
                    return Err(PathError::InvalidPercentEncoding {
                        input: input.to_string(),
                        index: i,
                    });
                }
                let value = decode_hex_pair(bytes[i + 1], bytes[i + 2]).ok_or_else(|| {
                    PathError::InvalidPercentEncoding {
                        input: input.to_string(),
                        index: i,
                    }
                })?;
                output.push(value);
                i += 3;
            }
            byte => {
                output.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(output).map_err(|_| PathError::NonAscii {
        input: input.to_string(),
    })
}

fn decode_hex_pair(hi: u8, lo: u8) -> Option<u8> {
    fn val(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    Some(val(hi)? << 4 | val(lo)?)
}

fn validate_characters(candidate: &str, original: &str) -> PathResult<()> {
    if candidate.is_empty() {
        return Err(PathError::Empty);
    }
    if !candidate.is_ascii() {
        return Err(PathError::NonAscii {
            input: original.to_string(),
        });
    }
    if !candidate.starts_with('/') {
        return Err(PathError::MissingLeadingSlash {
            input: original.to_string(),
        });
    }
    for &b in candidate.as_bytes() {
        if b <= 0x20 || b == 0x7f {
            return Err(PathError::ControlOrWhitespace {
                input: original.to_string(),
                byte: b,
            });
        }
        match b {
            b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'-'
            | b'.'
            | b'_'
            | b'~'
            | b'!'
            | b'$'
            | b'&'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b'+'
            | b','
            | b';'
            | b'='
            | b':'
            | b'@'
            | b'/'
            | b'%' => {}
            _ => {
                return Err(PathError::DisallowedCharacter {
                    input: original.to_string(),
                    character: b as char,
                    byte: b,
                });
            }
        }
    }
    Ok(())
}

fn normalize(input: &str, config: &RouterOptions) -> String {
    let mut output = if config.allow_duplicate_slash {
        input.to_string()
    } else {
        collapse_duplicate_slashes(input)
    };

    if !config.strict_trailing_slash {
        trim_one_trailing_slash(&mut output);
    }

    output
}

fn trim_one_trailing_slash(value: &mut String) {
    if value.len() > 1 && value.ends_with('/') {
        value.pop();
    }
}

fn trim_trailing_slashes(value: &mut String) {
    while value.len() > 1 && value.ends_with('/') {
        value.pop();
    }
}

fn collapse_duplicate_slashes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut prev_was_slash = false;
    for ch in input.chars() {
        if ch == '/' {
            if !prev_was_slash {
                output.push(ch);
            }
            prev_was_slash = true;
        } else {
            output.push(ch);
            prev_was_slash = false;
        }
    }
    output
}

fn contains_parent_traversal(path: &str) -> bool {
    path == "/.." || path.starts_with("/../") || path.contains("/../") || path.ends_with("/..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Preprocessor {
        Preprocessor::default()
    }

    #[test]
    fn apply_lowercases_and_trims_one_trailing_slash_by_default() {
        let outcome = defaults().apply("/Users/Me/").expect("path should normalize");
        assert_eq!(outcome.normalized(), "/users/me");
        assert_eq!(outcome.original(), "/Users/Me/");

        let outcome = defaults().apply("/users/me//").expect("path should normalize");
        assert_eq!(outcome.normalized(), "/users/me/");
    }

    #[test]
    fn apply_keeps_root_path() {
        let outcome = defaults().apply("/").expect("root should normalize");
        assert_eq!(outcome.normalized(), "/");
    }

    #[test]
    fn apply_keeps_duplicate_slashes_by_default() {
        let outcome = defaults().apply("//users//me").expect("path should normalize");
        assert_eq!(outcome.normalized(), "//users//me");
    }

    #[test]
    fn apply_collapses_duplicate_slashes_when_disallowed() {
        let config = RouterOptions::builder()
            .allow_duplicate_slash(false)
            .build()
            .expect("options should build");
        let outcome = apply("//users//me", &config).expect("path should normalize");
        assert_eq!(outcome.normalized(), "/users/me");
    }

    #[test]
    fn apply_rejects_relative_paths() {
        let err = defaults().apply("status").expect_err("relative path rejected");
        assert_eq!(
            err,
            PathError::MissingLeadingSlash {
                input: "status".to_string()
            }
        );
    }

    #[test]
    fn apply_rejects_whitespace_and_disallowed_bytes() {
        match defaults().apply("/users me") {
            Err(PathError::ControlOrWhitespace { byte, .. }) => assert_eq!(byte, b' '),
            other => panic!("unexpected result: {other:?}"),
        }
        match defaults().apply("/users<me>") {
            Err(PathError::DisallowedCharacter { character, .. }) => assert_eq!(character, '<'),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn apply_rejects_parent_traversal() {
        assert!(matches!(
            defaults().apply("/users/../etc"),
            Err(PathError::InvalidParentTraversal { .. })
        ));
        assert!(matches!(
            defaults().apply("/.."),
            Err(PathError::InvalidParentTraversal { .. })
        ));
    }

    #[test]
    fn decode_reports_index_of_bad_escape() {
        let config = RouterOptions::builder()
            .decode_uri(true)
            .build()
            .expect("options should build");
        match apply("/bad/%4G", &config) {
            Err(PathError::InvalidPercentEncoding { index, .. }) => assert_eq!(index, 5),
            other => panic!("unexpected result: {other:?}"),
        }
        match apply("/bad/%4", &config) {
            Err(PathError::InvalidPercentEncoding { index, .. }) => assert_eq!(index, 5),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn resolve_request_drops_query_and_fragment() {
        let resolved = defaults()
            .resolve_request("/users/me?token=abc#top")
            .expect("request should resolve");
        assert_eq!(resolved.as_deref(), Some("/users/me"));
    }

    #[test]
    fn resolve_request_strips_mount_on_segment_boundary() {
        let pre = Preprocessor::new(
            RouterOptions::builder()
                .mount_path("/API/v1/")
                .build()
                .expect("options should build"),
        )
        .expect("mount should normalize");

        assert_eq!(pre.mount(), Some("/api/v1"));
        assert_eq!(
            pre.resolve_request("/api/v1/status").expect("resolve"),
            Some("/status".to_string())
        );
        assert_eq!(
            pre.resolve_request("/api/v1").expect("resolve"),
            Some("/".to_string())
        );
        assert_eq!(pre.resolve_request("/api/v10/status").expect("resolve"), None);
        assert_eq!(pre.resolve_request("/status").expect("resolve"), None);
    }

    #[test]
    fn root_mount_is_treated_as_no_mount() {
        let pre = Preprocessor::new(
            RouterOptions::builder()
                .mount_path("/")
                .build()
                .expect("options should build"),
        )
        .expect("mount should normalize");
        assert_eq!(pre.mount(), None);
    }
}
