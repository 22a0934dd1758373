use std::env;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};

/// Contest listing upstreams that can be enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestSourceKind {
    Codeforces,
    Kontests,
}

impl FromStr for ContestSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "codeforces" => Ok(ContestSourceKind::Codeforces),
            "kontests" => Ok(ContestSourceKind::Kontests),
            other => Err(format!("Unknown contest source: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub leetcode_url: String,
    pub codeforces_url: String,
    pub hackerrank_url: String,
    pub kontests_url: String,
    /// Queried in this order; results are concatenated
    pub contest_sources: Vec<ContestSourceKind>,
    /// Prefix taken from each contest source
    pub contest_limit: usize,
    pub sync_rate_per_second: u64,
    pub sync_rate_burst: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let contest_sources = or("CONTEST_SOURCES", "codeforces")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<ContestSourceKind>().map_err(|e| anyhow!(e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .context("Invalid CONTEST_SOURCES")?;

        let sync_rate_per_second = parse(&lookup, "SYNC_RATE_PER_SECOND", 1)?;
        let sync_rate_burst = parse(&lookup, "SYNC_RATE_BURST", 3)?;
        if sync_rate_per_second == 0 || sync_rate_burst == 0 {
            bail!("SYNC_RATE_PER_SECOND and SYNC_RATE_BURST must be positive");
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse(&lookup, "PORT", 8080)?,
            leetcode_url: or("LEETCODE_URL", "https://leetcode.com"),
            codeforces_url: or("CODEFORCES_URL", "https://codeforces.com"),
            hackerrank_url: or("HACKERRANK_URL", "https://www.hackerrank.com"),
            kontests_url: or("KONTESTS_URL", "https://kontests.net"),
            contest_sources,
            contest_limit: parse(&lookup, "CONTEST_LIMIT", 10)?,
            sync_rate_per_second,
            sync_rate_burst,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|key| (key == "DATABASE_URL").then(|| "postgres://test".to_string()))
            .unwrap()
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
