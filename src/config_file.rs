use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

const RC_FILE_NAME: &str = ".logsiftrc";

/// Configuration file handler for logsift
///
/// ```ini
/// defaults = --threads 8 --stats
///
/// [patterns]
/// ERROR
/// WARN(ING)?
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct ConfigFile {
    /// Arguments prepended to the command line
    pub defaults: Option<String>,
    /// Used when the command line gives no `-p/--pattern`
    pub patterns: Vec<String>,
}

impl ConfigFile {
    /// Merge the user file and then the project file over built-in defaults
    pub fn load() -> Result<Self> {
        discover_config_files()
            .iter()
            .try_fold(Self::default(), |config, path| {
                Ok(Self::merge_configs(config, Self::load_from_path(path)?))
            })
    }

    /// Load configuration with optional custom config file path
    pub fn load_with_custom_path(custom_path: Option<&str>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from_path(Path::new(path)),
            None => Self::load(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Self::parse_ini_content(&content))
    }

    fn parse_ini_content(content: &str) -> Self {
        let mut config = Self::default();
        let mut current_section = String::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            match current_section.as_str() {
                "" => {
                    if let Some((key, value)) = line.split_once('=') {
                        if key.trim() == "defaults" {
                            config.defaults = Some(value.trim().to_string());
                        }
                    }
                }
                // Whole line is the pattern; patterns may contain '='
                "patterns" => config.patterns.push(line.to_string()),
                _ => {}
            }
        }

        config
    }

    /// Merge two configuration objects, with the second taking precedence
    fn merge_configs(base: Self, overlay: Self) -> Self {
        Self {
            defaults: overlay.defaults.or(base.defaults),
            patterns: if overlay.patterns.is_empty() {
                base.patterns
            } else {
                overlay.patterns
            },
        }
    }

    /// Apply config defaults and patterns to raw command line arguments
    pub fn process_args(&self, args: Vec<String>) -> Result<Vec<String>> {
        let mut iter = args.into_iter();
        let mut result: Vec<String> = iter.next().into_iter().collect();

        if let Some(defaults) = &self.defaults {
            let default_args = shell_words::split(defaults)
                .context("Invalid defaults: failed to parse arguments")?;
            result.extend(default_args);
        }
        result.extend(iter);

        if !self.patterns.is_empty() && !has_pattern_arg(&result) {
            // Insert right after the program name so a trailing positional
            // input path keeps its place
            let at = result.len().min(1);
            // One `--pattern=<p>` token each, so a leading '-' stays a value
            let pattern_args = self.patterns.iter().map(|p| format!("--pattern={}", p));
            result.splice(at..at, pattern_args);
        }

        Ok(result)
    }
}

/// Existing config files, lowest precedence first.
///
/// The user file is `$XDG_CONFIG_HOME/logsift/config.ini` (falling back to
/// `~/.config`) or `~/.logsiftrc`. The project file is the nearest
/// `.logsiftrc` in the working directory or one of its parents.
fn discover_config_files() -> Vec<PathBuf> {
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from);
    let config_home = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| home.as_ref().map(|h| h.join(".config")));

    let user = config_home
        .map(|dir| dir.join("logsift").join("config.ini"))
        .into_iter()
        .chain(home.map(|h| h.join(RC_FILE_NAME)))
        .find(|path| path.is_file());

    let project = env::current_dir().ok().and_then(|cwd| {
        cwd.ancestors()
            .map(|dir| dir.join(RC_FILE_NAME))
            .find(|path| path.is_file())
    });

    let mut found: Vec<PathBuf> = user.into_iter().collect();
    if let Some(project) = project {
        if !found.contains(&project) {
            found.push(project);
        }
    }
    found
}

/// Whether the arguments already carry patterns, in any spelling clap accepts
/// (`-p X`, `-pX`, `-sp X`, `--pattern=X`, ...)
fn has_pattern_arg(args: &[String]) -> bool {
    Cli::try_parse_from(args).is_ok_and(|cli| !cli.patterns.is_empty())
}

/// Pull `--config-file <path>` out of raw args before clap runs
pub fn extract_config_file_arg(args: &[String]) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config-file" {
            return iter.next().cloned();
        }
        if let Some(value) = arg.strip_prefix("--config-file=") {
            return Some(value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "; comment").unwrap();
        writeln!(file, "defaults = --threads 8 --stats").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[patterns]").unwrap();
        writeln!(file, "ERROR").unwrap();
        writeln!(file, "level=warn").unwrap();
        file.flush().unwrap();

        let config = ConfigFile::load_from_path(file.path()).unwrap();
        assert_eq!(config.defaults, Some("--threads 8 --stats".to_string()));
        assert_eq!(config.patterns, vec!["ERROR", "level=warn"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ConfigFile::load_from_path(Path::new("/nonexistent/logsift.ini")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_unknown_sections_ignored() {
        let config = ConfigFile::parse_ini_content("[aliases]\nx = y\n[patterns]\nDEBUG\n");
        assert_eq!(config.defaults, None);
        assert_eq!(config.patterns, vec!["DEBUG"]);
    }

    #[test]
    fn test_defaults_are_prepended() {
        let config = ConfigFile {
            defaults: Some("--threads 2 -o 'out file.json'".to_string()),
            patterns: vec![],
        };
        let result = config
            .process_args(args(&["logsift", "--stats", "app.log"]))
            .unwrap();
        assert_eq!(
            result,
            args(&["logsift", "--threads", "2", "-o", "out file.json", "--stats", "app.log"])
        );
    }

    #[test]
    fn test_config_patterns_used_without_cli_patterns() {
        let config = ConfigFile {
            defaults: None,
            patterns: vec!["FATAL".to_string(), "ERROR".to_string()],
        };
        let result = config.process_args(args(&["logsift", "app.log"])).unwrap();
        assert_eq!(
            result,
            args(&["logsift", "--pattern=FATAL", "--pattern=ERROR", "app.log"])
        );
    }

    #[test]
    fn test_config_pattern_starting_with_hyphen() {
        let config = ConfigFile {
            defaults: None,
            patterns: vec!["-> failed".to_string(), "ERROR".to_string()],
        };
        let result = config.process_args(args(&["logsift", "app.log"])).unwrap();

        let cli = Cli::try_parse_from(&result).unwrap();
        assert_eq!(cli.patterns, vec!["-> failed", "ERROR"]);
        assert_eq!(cli.input.as_deref(), Some("app.log"));
    }

    #[test]
    fn test_clustered_short_pattern_flag_overrides_config_patterns() {
        let config = ConfigFile {
            defaults: None,
            patterns: vec!["FATAL".to_string()],
        };
        for original in [
            args(&["logsift", "-sp", "ERROR", "app.log"]),
            args(&["logsift", "-pERROR", "app.log"]),
            args(&["logsift", "--pattern=ERROR", "app.log"]),
        ] {
            let result = config.process_args(original.clone()).unwrap();
            assert_eq!(result, original);
        }
    }

    #[test]
    fn test_output_value_containing_p_is_not_a_pattern() {
        let config = ConfigFile {
            defaults: None,
            patterns: vec!["FATAL".to_string()],
        };
        let result = config
            .process_args(args(&["logsift", "-op.json", "app.log"]))
            .unwrap();
        assert_eq!(result, args(&["logsift", "--pattern=FATAL", "-op.json", "app.log"]));
    }

    #[test]
    fn test_cli_patterns_override_config_patterns() {
        let config = ConfigFile {
            defaults: None,
            patterns: vec!["FATAL".to_string()],
        };
        let original = args(&["logsift", "-p", "ERROR", "app.log"]);
        let result = config.process_args(original.clone()).unwrap();
        assert_eq!(result, original);
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let base = ConfigFile {
            defaults: Some("--stats".to_string()),
            patterns: vec!["A".to_string()],
        };
        let overlay = ConfigFile {
            defaults: None,
            patterns: vec!["B".to_string()],
        };
        let merged = ConfigFile::merge_configs(base, overlay);
        assert_eq!(merged.defaults, Some("--stats".to_string()));
        assert_eq!(merged.patterns, vec!["B"]);
    }

    #[test]
    fn test_extract_config_file_arg() {
        assert_eq!(
            extract_config_file_arg(&args(&["logsift", "--config-file", "my.ini"])),
            Some("my.ini".to_string())
        );
        assert_eq!(
            extract_config_file_arg(&args(&["logsift", "--config-file=x.ini"])),
            Some("x.ini".to_string())
        );
        assert_eq!(extract_config_file_arg(&args(&["logsift"])), None);
    }
}
