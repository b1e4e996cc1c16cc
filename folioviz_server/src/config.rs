// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines with target and line number.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Address to listen on (`FOLIOVIZ_LISTEN_ADDR`, default `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,
    /// Root of the static shell (`FOLIOVIZ_ASSET_DIR`, default `assets`).
    pub asset_dir: PathBuf,
    /// JSON data file replacing the sample portfolio (`FOLIOVIZ_DATA_FILE`).
    pub data_file: Option<PathBuf>,
    /// Log format (`FOLIOVIZ_LOG_FORMAT`, `text` or `json`).
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            asset_dir: PathBuf::from("assets"),
            data_file: None,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let listen_addr = match lookup("FOLIOVIZ_LISTEN_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("Invalid FOLIOVIZ_LISTEN_ADDR '{addr}'"))?,
            None => defaults.listen_addr,
        };
        let asset_dir = lookup("FOLIOVIZ_ASSET_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.asset_dir);
        let data_file = lookup("FOLIOVIZ_DATA_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let log_format = match lookup("FOLIOVIZ_LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Ok(Self {
            listen_addr,
            asset_dir,
            data_file,
            log_format,
        })
    }
}
