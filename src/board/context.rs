//! Process-wide precomputed tables.
//!
//! Fingerprint keys, slider attack tables and the in-between table are built
//! once by [`init`] / [`init_with`] and shared read-only by every
//! [`Position`](super::Position). Positions cannot be created before this runs.

use log::{info, warn};
use once_cell::sync::OnceCell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::attack_tables::AttackTables;
use super::error::InitError;
use crate::zobrist::ZobristKeys;

static TABLES: OnceCell<EngineTables> = OnceCell::new();

/// Seeds and limits for table construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    pub zobrist_seed: u64,
    pub magic_seed: u64,
    /// Candidate multipliers tried per square before giving up.
    pub max_magic_attempts: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            zobrist_seed: 1_070_372,
            magic_seed: 12345,
            max_magic_attempts: 100_000_000,
        }
    }
}

/// Immutable context captured by every position.
pub struct EngineTables {
    config: TableConfig,
    zobrist: ZobristKeys,
    attacks: AttackTables,
}

impl EngineTables {
    /// Build a private set of tables, fingerprint keys first.
    ///
    /// Most callers want [`init`], which builds the shared instance once.
    ///
    /// # Errors
    /// Propagates [`InitError`] from the magic search.
    pub fn build(config: TableConfig) -> Result<Self, InitError> {
        let zobrist = ZobristKeys::new(config.zobrist_seed);
        let attacks = AttackTables::build(config.magic_seed, config.max_magic_attempts)?;
        Ok(EngineTables {
            config,
            zobrist,
            attacks,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn zobrist(&self) -> &ZobristKeys {
        &self.zobrist
    }

    #[inline]
    #[must_use]
    pub fn attacks(&self) -> &AttackTables {
        &self.attacks
    }
}

/// Build the shared tables with the default configuration.
///
/// # Errors
/// See [`init_with`].
pub fn init() -> Result<&'static EngineTables, InitError> {
    init_with(TableConfig::default())
}

/// Build the shared tables once. Later calls return the existing instance;
/// a later call with a different config is ignored with a warning.
///
/// # Errors
/// Returns [`InitError::MagicSearchExhausted`] if the magic search fails. The
/// shared instance stays unset, so a later call may retry with another config.
pub fn init_with(config: TableConfig) -> Result<&'static EngineTables, InitError> {
    let tables = TABLES.get_or_try_init(|| {
        let built = EngineTables::build(config)?;
        info!(
            "engine tables initialized (zobrist seed {}, magic seed {}, {} slider entries)",
            config.zobrist_seed,
            config.magic_seed,
            built.attacks.slider_table_len()
        );
        Ok::<_, InitError>(built)
    })?;
    if tables.config != config {
        warn!(
            "init_with called with {config:?} after tables were built with {:?}; keeping the existing tables",
            tables.config
        );
    }
    Ok(tables)
}

/// The shared tables, if [`init`] has completed.
#[must_use]
pub fn tables() -> Option<&'static EngineTables> {
    TABLES.get()
}
