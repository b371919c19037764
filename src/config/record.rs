// src/config/record.rs

//! The persisted launch config record.
//!
//! A flat `key=value` text file holding the four answers piped to the
//! training script. The file is owner-only (0600) because it sits next to
//! credential material, and it is always rewritten wholesale: a save writes
//! a sibling temp file and renames it over the target so a failed write can
//! never corrupt the previous record.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::errors::{Result, SwarmherdError};
use crate::types::{Flag, ParamBillions, SwarmVariant};

const KEY_NETWORK_MODE: &str = "network_mode";
const KEY_SWARM_VARIANT: &str = "swarm_variant";
const KEY_PARAMETER_COUNT: &str = "parameter_count";
const KEY_PUBLISH_FLAG: &str = "publish_flag";

/// The four-field record controlling the launched script's startup inputs.
///
/// `network_mode` and `publish_flag` are fixed by this tool and not
/// user-settable; they are carried in the record (and re-forced on load) so
/// the on-disk file is self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRecord {
    pub network_mode: Flag,
    pub swarm_variant: SwarmVariant,
    pub parameter_count: ParamBillions,
    pub publish_flag: Flag,
}

impl ConfigRecord {
    /// The fixed value of `network_mode`.
    pub const NETWORK_MODE: Flag = Flag::Enabled;
    /// The fixed value of `publish_flag`.
    pub const PUBLISH_FLAG: Flag = Flag::Disabled;

    /// The four answer lines piped to the training script, in prompt order.
    pub fn answer_lines(&self) -> [String; 4] {
        [
            self.network_mode.answer().to_string(),
            self.swarm_variant.to_string(),
            self.parameter_count.to_string(),
            self.publish_flag.answer().to_string(),
        ]
    }

    fn serialize(&self) -> String {
        format!(
            "{KEY_NETWORK_MODE}={}\n{KEY_SWARM_VARIANT}={}\n{KEY_PARAMETER_COUNT}={}\n{KEY_PUBLISH_FLAG}={}\n",
            self.network_mode, self.swarm_variant, self.parameter_count, self.publish_flag
        )
    }

    /// Parse the flat key=value format.
    ///
    /// Unknown keys are ignored and unparsable values keep the default for
    /// that field, so a hand-edited file degrades gracefully instead of
    /// blocking the launcher. The two fixed fields are forced regardless of
    /// what the file says.
    fn parse(contents: &str) -> Self {
        let mut record = ConfigRecord::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!(line, "ignoring malformed config record line");
                continue;
            };
            match key.trim() {
                KEY_SWARM_VARIANT => match SwarmVariant::from_str(value) {
                    Ok(v) => record.swarm_variant = v,
                    Err(e) => warn!(error = %e, "keeping default swarm_variant"),
                },
                KEY_PARAMETER_COUNT => match ParamBillions::from_str(value) {
                    Ok(v) => record.parameter_count = v,
                    Err(e) => warn!(error = %e, "keeping default parameter_count"),
                },
                // Fixed fields: parsed only to detect tampering, never honored.
                KEY_NETWORK_MODE | KEY_PUBLISH_FLAG => {}
                other => debug!(key = other, "ignoring unknown config record key"),
            }
        }
        record.network_mode = Self::NETWORK_MODE;
        record.publish_flag = Self::PUBLISH_FLAG;
        record
    }
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            network_mode: Self::NETWORK_MODE,
            swarm_variant: SwarmVariant::default(),
            parameter_count: ParamBillions::default(),
            publish_flag: Self::PUBLISH_FLAG,
        }
    }
}

/// Reads and writes the config record at a fixed path.
///
/// Single-process, single-writer; no locking.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record without side effects.
    ///
    /// `Ok(None)` means no record exists yet; the launcher uses this to
    /// decide whether to pipe answers to the child at all.
    pub fn try_load(&self) -> Result<Option<ConfigRecord>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(ConfigRecord::parse(&contents)))
    }

    /// Read the record, creating it with defaults if absent.
    pub fn load(&self) -> Result<ConfigRecord> {
        match self.try_load()? {
            Some(record) => Ok(record),
            None => {
                let record = ConfigRecord::default();
                debug!(path = %self.path.display(), "no config record; writing defaults");
                self.save(&record)?;
                Ok(record)
            }
        }
    }

    /// Atomically rewrite the record in full.
    ///
    /// Writes a sibling `.tmp` file with owner-only permissions and renames
    /// it over the target. The previous record survives any failure before
    /// the rename.
    pub fn save(&self, record: &ConfigRecord) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            SwarmherdError::RecordError(format!(
                "config record path has no parent directory: {}",
                self.path.display()
            ))
        })?;
        fs::create_dir_all(parent)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, record.serialize())?;
        restrict_to_owner(&tmp)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "config record saved");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

/// Prompt for the two user-settable fields, keeping the current value on
/// blank or invalid input.
///
/// Generic over the streams so tests can drive it with in-memory buffers.
pub fn update_interactive<R: BufRead, W: Write>(
    current: &ConfigRecord,
    input: &mut R,
    output: &mut W,
) -> Result<ConfigRecord> {
    let mut updated = *current;

    write!(
        output,
        "Swarm variant [A/B] (current: {}): ",
        current.swarm_variant
    )?;
    output.flush()?;
    let answer = read_line(input)?;
    if !answer.trim().is_empty() {
        match SwarmVariant::from_str(&answer) {
            Ok(v) => updated.swarm_variant = v,
            Err(e) => {
                writeln!(output, "{e}; keeping {}", current.swarm_variant)?;
            }
        }
    }

    write!(
        output,
        "Parameter count in billions [0.5/1.5/7/32/72] (current: {}): ",
        current.parameter_count
    )?;
    output.flush()?;
    let answer = read_line(input)?;
    if !answer.trim().is_empty() {
        match ParamBillions::from_str(&answer) {
            Ok(v) => updated.parameter_count = v,
            Err(e) => {
                writeln!(output, "{e}; keeping {}", current.parameter_count)?;
            }
        }
    }

    // Not user-settable; always forced.
    updated.network_mode = ConfigRecord::NETWORK_MODE;
    updated.publish_flag = ConfigRecord::PUBLISH_FLAG;

    Ok(updated)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}
