use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

use crate::defaults::DEFAULT_CONFIG;
use crate::error::ConfigError;

/// JSON configuration addressed by dotted key paths (`network.brain_ip`).
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    path: PathBuf,
    data: Value,
}

impl DesktopConfig {
    /// Defaults only, bound to `path` for later saves.
    pub fn defaults(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: DEFAULT_CONFIG.clone(),
        }
    }

    /// Load `path` over the defaults. A missing file yields the defaults.
    pub fn try_load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::defaults(path)),
            Err(err) => return Err(ConfigError::io("reading config", path, err)),
        };
        let loaded: Value = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        if !loaded.is_object() {
            return Err(ConfigError::NotAnObject { path });
        }

        let mut data = DEFAULT_CONFIG.clone();
        deep_merge(&mut data, loaded);
        Ok(Self { path, data })
    }

    /// Like [`try_load`](Self::try_load), but any failure falls back to the defaults.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::try_load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(target: "desktop_config", error = %err, "using default configuration");
                Self::defaults(path)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Value at `key`, or `None` when any segment is missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.data, |value, segment| value.as_object()?.get(segment))
    }

    /// String form of a scalar at `key`; `null`, objects and arrays count as absent.
    pub fn get_opt_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        self.get_opt_str(key)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.get(key).and_then(Value::as_u64).unwrap_or(default)
    }

    /// Set `key` in memory, creating intermediate objects, then persist.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        self.set_in_memory(key, value.into())?;
        self.save()
    }

    fn set_in_memory(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ConfigError::InvalidKeyPath {
                key: key.to_string(),
                reason: "empty segment",
            });
        }
        let Some((last, parents)) = segments.split_last() else {
            return Err(ConfigError::InvalidKeyPath {
                key: key.to_string(),
                reason: "empty key",
            });
        };

        let mut target = &mut self.data;
        for segment in parents {
            let Some(object) = target.as_object_mut() else {
                return Err(ConfigError::InvalidKeyPath {
                    key: key.to_string(),
                    reason: "segment is not an object",
                });
            };
            target = object
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        let Some(object) = target.as_object_mut() else {
            return Err(ConfigError::InvalidKeyPath {
                key: key.to_string(),
                reason: "segment is not an object",
            });
        };
        object.insert((*last).to_string(), value);
        Ok(())
    }

    /// Write the whole document, replacing the file atomically.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| ConfigError::io("creating config directory", parent, err))?;
            }
        }

        let mut contents =
            serde_json::to_string_pretty(&self.data).map_err(|source| ConfigError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        contents.push('\n');

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut file = fs::File::create(&tmp_path)
            .map_err(|err| ConfigError::io("creating temp config", &tmp_path, err))?;
        file.write_all(contents.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|err| ConfigError::io("writing temp config", &tmp_path, err))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|err| ConfigError::io("replacing config", &self.path, err))
    }
}

/// Recursively merge `updates` into `base`; objects merge key by key, anything else replaces.
pub fn deep_merge(base: &mut Value, updates: Value) {
    match (base, updates) {
        (Value::Object(base), Value::Object(updates)) => {
            for (key, value) in updates {
                match base.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, updates) => *base = updates,
    }
}
