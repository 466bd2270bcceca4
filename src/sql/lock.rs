//! Pessimistic / optimistic lock requests attached to SELECT statements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lock modes, ordered by strength.
///
/// `Read` is the threshold: anything stronger requires a row lock in the
/// generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    #[default]
    None,
    Read,
    Optimistic,
    OptimisticForceIncrement,
    PessimisticRead,
    PessimisticWrite,
    /// PESSIMISTIC_WRITE that fails immediately when rows are locked.
    UpgradeNoWait,
    /// PESSIMISTIC_WRITE that skips rows locked by others.
    UpgradeSkipLocked,
    PessimisticForceIncrement,
}

impl LockMode {
    fn level(self) -> u8 {
        match self {
            LockMode::None => 0,
            LockMode::Read => 5,
            LockMode::Optimistic => 6,
            LockMode::OptimisticForceIncrement => 7,
            LockMode::PessimisticRead => 12,
            LockMode::PessimisticWrite | LockMode::UpgradeNoWait | LockMode::UpgradeSkipLocked => {
                13
            }
            LockMode::PessimisticForceIncrement => 17,
        }
    }

    /// `self < other` in lock strength.
    pub fn less_than(self, other: LockMode) -> bool {
        self.level() < other.level()
    }

    /// Whether this mode needs a row lock (strictly stronger than `Read`).
    pub fn requires_row_lock(self) -> bool {
        LockMode::Read.less_than(self)
    }

    /// The stronger of two modes; ties keep `self`.
    pub fn max(self, other: LockMode) -> LockMode {
        if self.less_than(other) {
            other
        } else {
            self
        }
    }
}

/// What to do when a requested row is already locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockTimeout {
    /// Wait for the database default.
    #[default]
    Wait,
    NoWait,
    SkipLocked,
    /// Wait at most this many seconds.
    Seconds(u32),
}

/// Lock request for a SELECT statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockOptions {
    /// Mode applied to every root table reference.
    #[serde(default)]
    pub lock_mode: LockMode,
    /// Per identification variable (alias) overrides, valid in any query part.
    #[serde(default)]
    pub alias_specific: BTreeMap<String, LockMode>,
    #[serde(default)]
    pub timeout: LockTimeout,
}

impl LockOptions {
    pub fn new(lock_mode: LockMode) -> Self {
        Self {
            lock_mode,
            ..Self::default()
        }
    }

    #[must_use = "builders have no effect until used"]
    pub fn with_alias(mut self, alias: &str, lock_mode: LockMode) -> Self {
        self.alias_specific.insert(alias.into(), lock_mode);
        self
    }

    #[must_use = "builders have no effect until used"]
    pub fn with_timeout(mut self, timeout: LockTimeout) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lock_mode == LockMode::None && self.alias_specific.is_empty()
    }

    /// Timeout after folding in the UPGRADE_* modes.
    pub fn effective_timeout(&self, lock_mode: LockMode) -> LockTimeout {
        match lock_mode {
            LockMode::UpgradeNoWait => LockTimeout::NoWait,
            LockMode::UpgradeSkipLocked => LockTimeout::SkipLocked,
            _ => self.timeout,
        }
    }
}

/// Row locks that were not expressed as table hints and must be rendered
/// as a trailing clause on the root query.
#[derive(Debug, Clone, PartialEq)]
pub struct ForUpdateClause {
    pub lock_mode: LockMode,
    pub aliases: Vec<String>,
}

impl ForUpdateClause {
    pub fn new(lock_mode: LockMode) -> Self {
        Self {
            lock_mode,
            aliases: vec![],
        }
    }

    pub fn merge(&mut self, lock_mode: LockMode, alias: &str) {
        self.lock_mode = self.lock_mode.max(lock_mode);
        if !self.aliases.iter().any(|a| a == alias) {
            self.aliases.push(alias.to_string());
        }
    }
}
