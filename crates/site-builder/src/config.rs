//! Directory layout for a build, overridable through the environment.

use std::env;
use std::path::PathBuf;

/// Where a build reads its inputs and writes its output.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl SiteConfig {
    /// Layout for the weekly all-companies build. Output defaults to `docs/`.
    pub fn weekly_from_env() -> Self {
        Self {
            data_dir: env_dir("STOCKWATCH_DATA_DIR", "data"),
            static_dir: env_dir("STOCKWATCH_STATIC_DIR", "static"),
            output_dir: env_dir("STOCKWATCH_OUTPUT_DIR", "docs"),
        }
    }

    /// Layout for the top-25 build. Output defaults to `docs-top25/` so the
    /// two sites never clobber each other.
    pub fn top25_from_env() -> Self {
        Self {
            data_dir: env_dir("STOCKWATCH_DATA_DIR", "data"),
            static_dir: env_dir("STOCKWATCH_STATIC_DIR", "static"),
            output_dir: env_dir("STOCKWATCH_TOP25_OUTPUT_DIR", "docs-top25"),
        }
    }

    pub fn companies_file(&self) -> PathBuf {
        self.data_dir.join("socal_companies.json")
    }

    pub fn top25_file(&self) -> PathBuf {
        self.data_dir.join("top25_companies.json")
    }

    pub fn price_history_file(&self) -> PathBuf {
        self.data_dir.join("price_history.json")
    }
}

fn env_dir(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_dir_falls_back_to_default() {
        assert_eq!(
            env_dir("STOCKWATCH_TEST_UNSET_DIR", "data"),
            PathBuf::from("data")
        );
    }

    #[test]
    fn env_dir_reads_the_override() {
        env::set_var("STOCKWATCH_TEST_OVERRIDE_DIR", "/tmp/elsewhere");
        assert_eq!(
            env_dir("STOCKWATCH_TEST_OVERRIDE_DIR", "data"),
            PathBuf::from("/tmp/elsewhere")
        );
        env::remove_var("STOCKWATCH_TEST_OVERRIDE_DIR");
    }

    #[test]
    fn data_files_hang_off_the_data_dir() {
        let config = SiteConfig {
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("docs"),
        };
        assert_eq!(
            config.price_history_file(),
            PathBuf::from("data/price_history.json")
        );
        assert_eq!(
            config.companies_file(),
            PathBuf::from("data/socal_companies.json")
        );
        assert_eq!(
            config.top25_file(),
            PathBuf::from("data/top25_companies.json")
        );
    }
}
