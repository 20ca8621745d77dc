//! Rule-file loader
//!
//! The rule file is external configuration: a YAML list of rule
//! definitions holding the deployment's agronomic thresholds. Loading
//! happens once at startup; any problem with the file is fatal there,
//! before the first evaluation.

use crate::rule::Rule;
use crate::ruleset::{RuleSet, RuleSetError};
use std::path::Path;

impl RuleSet {
    /// Read, parse, and compile a YAML rule file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let set = Self::parse(&contents)?;
        tracing::debug!(path = %path.display(), rule_count = set.len(), "rule file loaded");
        Ok(set)
    }

    /// Parse and compile rule definitions from YAML text.
    pub fn parse(yaml: &str) -> Result<Self, RuleSetError> {
        let rules: Vec<Rule> = serde_yaml::from_str(yaml)?;
        Self::compile(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RULES_YAML: &str = r#"
- id: low-moisture-flowering
  description: Low soil moisture during flowering
  priority: 100
  condition:
    all_of:
      - soil_moisture_below: 20.0
      - growth_stage_is: flowering
  effects:
    - set_action: irrigate now
    - append_explanation: soil moisture is critically low during flowering

- id: heat-on-sandy-soil
  description: High temperature on fast-draining soil
  priority: 80
  condition:
    all_of:
      - temperature_above: 28.0
      - soil_type_is: sandy
  effects:
    - set_action: increase irrigation frequency
    - append_explanation: sandy soil dries quickly under high temperature
"#;

    #[test]
    fn parse_builds_a_compiled_set() {
        let set = RuleSet::parse(RULES_YAML).unwrap();
        assert_eq!(set.len(), 2);
        // Compiled order: priority descending.
        let first = set.iter().next().unwrap();
        assert_eq!(first.id, "low-moisture-flowering");
        assert_eq!(first.priority, 100);
    }

    #[test]
    fn load_reads_a_rule_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RULES_YAML.as_bytes()).unwrap();

        let set = RuleSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("heat-on-sandy-soil").is_some());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RuleSet::load("/nonexistent/rules.yaml").unwrap_err();
        assert!(matches!(err, RuleSetError::Io(_)));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = RuleSet::parse("- id: broken\n  priority: not-a-number\n").unwrap_err();
        assert!(matches!(err, RuleSetError::Parse(_)));
    }

    #[test]
    fn duplicate_ids_in_a_file_fail_before_any_evaluation() {
        let yaml = r#"
- id: same
  priority: 1
  condition: always
  effects: []
- id: same
  priority: 2
  condition: always
  effects: []
"#;
        let err = RuleSet::parse(yaml).unwrap_err();
        assert!(matches!(err, RuleSetError::DuplicateRuleId(_)));
    }
}
