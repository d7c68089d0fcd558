use std::time::Duration;

use crate::auth::Token;
use crate::error::{Result, TriggerError};

pub const TRIGGER_TOKEN_VAR: &str = "TRIGGER_TOKEN";
pub const READ_API_TOKEN_VAR: &str = "READ_API_TOKEN";
pub const SOURCE_BRANCH_VAR: &str = "CLINICAL_REASONING_BRANCH";
pub const TARGET_BRANCH_VAR: &str = "CDR_CR_BRANCH";

pub const DEFAULT_TARGET_BRANCH: &str = "main";
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com";
pub const DEFAULT_PROJECT: &str = "cqframework/cdr-clinical-reasoning";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Raw, unvalidated inputs as collected from the environment or flags.
#[derive(Debug, Default, Clone)]
pub struct RunnerInputs {
    pub trigger_token: Option<String>,
    pub read_token: Option<String>,
    pub source_branch: Option<String>,
    pub target_branch: Option<String>,
    pub base_url: String,
    pub project: String,
    pub poll_interval_secs: u64,
}

/// Validated configuration, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub trigger_token: Token,
    pub read_token: Token,
    pub source_branch: Option<String>,
    pub target_branch: String,
    /// Set when no target branch was given and [`DEFAULT_TARGET_BRANCH`] is used.
    pub target_defaulted: bool,
    pub base_url: String,
    pub project: String,
    pub poll_interval: Duration,
}

impl RunnerConfig {
    /// Validates raw inputs.
    ///
    /// Empty values count as unset. Both tokens are checked before returning so
    /// the error names every missing variable at once.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingConfig`] if either token is missing and
    /// [`TriggerError::Config`] for an empty project or a zero poll interval.
    pub fn from_inputs(inputs: RunnerInputs) -> Result<Self> {
        let trigger_token = non_empty(inputs.trigger_token);
        let read_token = non_empty(inputs.read_token);

        let missing: Vec<&str> = [
            (TRIGGER_TOKEN_VAR, trigger_token.is_none()),
            (READ_API_TOKEN_VAR, read_token.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(trigger_token), Some(read_token)) = (trigger_token, read_token) else {
            return Err(TriggerError::MissingConfig(missing.join(", ")));
        };

        if inputs.project.trim().is_empty() {
            return Err(TriggerError::Config("project must not be empty".to_string()));
        }

        if inputs.poll_interval_secs == 0 {
            return Err(TriggerError::Config(
                "poll interval must be at least one second".to_string(),
            ));
        }

        let (target_branch, target_defaulted) = match non_empty(inputs.target_branch) {
            Some(branch) => (branch, false),
            None => (DEFAULT_TARGET_BRANCH.to_string(), true),
        };

        Ok(Self {
            trigger_token: Token::from(trigger_token),
            read_token: Token::from(read_token),
            source_branch: non_empty(inputs.source_branch),
            target_branch,
            target_defaulted,
            base_url: inputs.base_url,
            project: inputs.project,
            poll_interval: Duration::from_secs(inputs.poll_interval_secs),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RunnerInputs {
        RunnerInputs {
            trigger_token: Some("trigger-secret".to_string()),
            read_token: Some("read-secret".to_string()),
            source_branch: None,
            target_branch: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            project: DEFAULT_PROJECT.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }

    #[test]
    fn test_defaults_target_branch_to_main() {
        let config = RunnerConfig::from_inputs(inputs()).unwrap();
        assert_eq!(config.target_branch, "main");
        assert!(config.target_defaulted);
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.source_branch, None);
    }

    #[test]
    fn test_explicit_branches_are_kept() {
        let config = RunnerConfig::from_inputs(RunnerInputs {
            source_branch: Some("feature/measure-fix".to_string()),
            target_branch: Some("release-2026.08".to_string()),
            ..inputs()
        })
        .unwrap();

        assert_eq!(config.target_branch, "release-2026.08");
        assert!(!config.target_defaulted);
        assert_eq!(config.source_branch.as_deref(), Some("feature/measure-fix"));
    }

    #[test]
    fn test_empty_target_branch_falls_back_to_default() {
        let config = RunnerConfig::from_inputs(RunnerInputs {
            target_branch: Some("  ".to_string()),
            source_branch: Some(String::new()),
            ..inputs()
        })
        .unwrap();

        assert_eq!(config.target_branch, DEFAULT_TARGET_BRANCH);
        assert!(config.target_defaulted);
        assert_eq!(config.source_branch, None);
    }

    #[test]
    fn test_missing_trigger_token() {
        let err = RunnerConfig::from_inputs(RunnerInputs {
            trigger_token: None,
            ..inputs()
        })
        .unwrap_err();

        match err {
            TriggerError::MissingConfig(names) => assert_eq!(names, "TRIGGER_TOKEN"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_both_tokens_names_both() {
        let err = RunnerConfig::from_inputs(RunnerInputs {
            trigger_token: Some(String::new()),
            read_token: None,
            ..inputs()
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing required environment variable(s): TRIGGER_TOKEN, READ_API_TOKEN"
        );
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let result = RunnerConfig::from_inputs(RunnerInputs {
            poll_interval_secs: 0,
            ..inputs()
        });

        assert!(matches!(result, Err(TriggerError::Config(_))));
    }

    #[test]
    fn test_tokens_do_not_leak_through_debug() {
        let config = RunnerConfig::from_inputs(inputs()).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("trigger-secret"));
        assert!(!rendered.contains("read-secret"));
    }
}
