use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Defaults mirror Express: case-insensitive, one optional trailing slash,
/// inner slashes kept as-is, `HEAD` served by `GET` routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterOptions {
    pub case_sensitive: bool,
    pub strict_trailing_slash: bool,
    pub decode_uri: bool,
    pub normalize_path: bool,
    pub allow_duplicate_slash: bool,
    pub head_falls_back_to_get: bool,
    pub mount_path: Option<String>,
    pub debug: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            strict_trailing_slash: false,
            decode_uri: false,
            normalize_path: true,
            allow_duplicate_slash: true,
            head_falls_back_to_get: true,
            mount_path: None,
            debug: false,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    /// Missing fields take their default values.
    pub fn from_json(input: &str) -> Result<Self, RouterOptionsError> {
        let options: RouterOptions =
            serde_json::from_str(input).map_err(|err| RouterOptionsError::Parse {
                reason: err.to_string(),
            })?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if let Some(mount) = self.mount_path.as_deref() {
            if mount.is_empty() {
                return Err(RouterOptionsError::EmptyMountPath);
            }
            if !mount.starts_with('/') {
                return Err(RouterOptionsError::MountPathNotAbsolute {
                    path: mount.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.options.case_sensitive = value;
        self
    }

    pub fn strict_trailing_slash(mut self, value: bool) -> Self {
        self.options.strict_trailing_slash = value;
        self
    }

    pub fn decode_uri(mut self, value: bool) -> Self {
        self.options.decode_uri = value;
        self
    }

    pub fn normalize_path(mut self, value: bool) -> Self {
        self.options.normalize_path = value;
        self
    }

    pub fn allow_duplicate_slash(mut self, value: bool) -> Self {
        self.options.allow_duplicate_slash = value;
        self
    }

    pub fn head_falls_back_to_get(mut self, value: bool) -> Self {
        self.options.head_falls_back_to_get = value;
        self
    }

    pub fn mount_path<S: Into<String>>(mut self, path: S) -> Self {
        self.options.mount_path = Some(path.into());
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("mount path must not be empty")]
    EmptyMountPath,
    #[error("mount path must start with '/' (got '{path}')")]
    MountPathNotAbsolute { path: String },
    #[error("router options could not be parsed: {reason}")]
    Parse { reason: String },
}
