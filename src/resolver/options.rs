//! Storage Class Options
//!
//! Picks the recognized keys out of a storage class parameter map. Key
//! names match case-insensitively; values are kept verbatim.
//!
//! Keys this resolver does not know are skipped without complaint so that
//! storage classes written for newer plugin versions keep working.

use crate::error::{Error, Result};

pub const OPTION_TYPE: &str = "type";
pub const OPTION_FS_TYPE: &str = "fsType";
pub const OPTION_REPLICA: &str = "replica";
pub const OPTION_TAGS: &str = "tags";

/// A storage class key the resolver understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    VolumeType,
    FsType,
    Replica,
    Tags,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [
        OptionKey::VolumeType,
        OptionKey::FsType,
        OptionKey::Replica,
        OptionKey::Tags,
    ];

    /// Canonical spelling of the key
    pub fn name(self) -> &'static str {
        match self {
            OptionKey::VolumeType => OPTION_TYPE,
            OptionKey::FsType => OPTION_FS_TYPE,
            OptionKey::Replica => OPTION_REPLICA,
            OptionKey::Tags => OPTION_TAGS,
        }
    }

    /// Match a raw key, ignoring ASCII case
    pub fn parse(key: &str) -> Option<OptionKey> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raw values of the recognized keys, not yet validated
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawOptions {
    pub volume_type: Option<String>,
    pub fs_type: Option<String>,
    pub replica: Option<String>,
    pub tags: Option<String>,
}

impl RawOptions {
    /// Collect recognized keys from any key/value sequence.
    ///
    /// Two spellings of one key (`type` and `TYPE`) may both appear only if
    /// they carry the same value; otherwise the outcome would depend on map
    /// iteration order.
    pub fn collect<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = RawOptions::default();

        for (key, value) in options {
            let Some(option) = OptionKey::parse(key.as_ref()) else {
                continue;
            };
            let value = value.as_ref();
            let slot = raw.slot_mut(option);

            if let Some(existing) = slot.as_deref() {
                if existing != value {
                    let (first, second) = if existing < value {
                        (existing, value)
                    } else {
                        (value, existing)
                    };
                    return Err(Error::malformed(
                        option.name(),
                        second,
                        format!("conflicting values for key spelled differently: {:?}", first),
                    ));
                }
                continue;
            }
            *slot = Some(value.to_string());
        }

        Ok(raw)
    }

    pub fn get(&self, option: OptionKey) -> Option<&str> {
        match option {
            OptionKey::VolumeType => self.volume_type.as_deref(),
            OptionKey::FsType => self.fs_type.as_deref(),
            OptionKey::Replica => self.replica.as_deref(),
            OptionKey::Tags => self.tags.as_deref(),
        }
    }

    fn slot_mut(&mut self, option: OptionKey) -> &mut Option<String> {
        match option {
            OptionKey::VolumeType => &mut self.volume_type,
            OptionKey::FsType => &mut self.fs_type,
            OptionKey::Replica => &mut self.replica,
            OptionKey::Tags => &mut self.tags,
        }
    }
}

/// Parse an integer-valued option
pub(crate) fn parse_int(option: OptionKey, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|e| Error::malformed(option.name(), value, e))
}

/// Split a tag list: every whitespace character is dropped, then the rest
/// is split on commas. Order and duplicates are kept.
pub(crate) fn parse_tags(value: &str) -> Vec<String> {
    let stripped: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return Vec::new();
    }
    stripped.split(',').map(str::to_string).collect()
}
