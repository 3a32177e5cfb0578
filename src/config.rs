//! Configuration for linestore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a linestore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The flat file holding one record per line
    pub path: PathBuf,

    // -------------------------------------------------------------------------
    // Wire Format Configuration
    // -------------------------------------------------------------------------
    /// Line ending written by mutations. Reads always accept `\r`, `\n`
    /// and `\r\n` regardless of this setting.
    pub newline: Newline,
}

/// Line ending convention used when writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    /// Unix convention, `\n`
    Lf,

    /// DOS convention, `\r\n`
    CrLf,
}

impl Newline {
    /// The byte sequence this convention terminates lines with
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

impl Default for Newline {
    fn default() -> Self {
        Newline::Lf
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./linestore.txt"),
            newline: Newline::default(),
        }
    }
}

impl Config {
    /// Create a config for the given store file with default settings
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the written line ending convention
    pub fn newline(mut self, newline: Newline) -> Self {
        self.config.newline = newline;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
