//! Native backends

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::{Tone, ToneSink};
use crate::error::StoreError;
use crate::highscores::KeyValueStore;

/// Key-value store backed by a small JSON file
///
/// Every write goes to a temp file that is renamed over the target, then
/// read back, so a crash never leaves a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, f64>,
}

impl FileStore {
    /// Open the store, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = if path.exists() {
            read_values(&path)?
        } else {
            BTreeMap::new()
        };
        log::info!("Opened store {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_atomic(&self, values: &BTreeMap<String, f64>) -> Result<(), StoreError> {
        let tmp = self.tmp_path();
        fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, f64>, StoreError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl KeyValueStore for FileStore {
    fn get_number(&self, key: &str) -> Result<Option<f64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_number(&mut self, key: &str, value: f64) -> Result<(), StoreError> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value);
        self.write_atomic(&next)?;

        let on_disk = read_values(&self.path)?;
        if on_disk.get(key) != Some(&value) {
            return Err(StoreError::Unconfirmed {
                key: key.to_string(),
            });
        }
        self.values = on_disk;
        Ok(())
    }
}

/// Tone sink for headless runs: tones only show up in the trace log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogToneSink;

impl ToneSink for LogToneSink {
    fn play(&mut self, tone: Tone, volume: f32, delay: f32) {
        log::trace!(
            "tone {:.0} Hz for {:.2}s at {:.2} (+{:.2}s)",
            tone.frequency,
            tone.duration,
            volume,
            delay
        );
    }
}
