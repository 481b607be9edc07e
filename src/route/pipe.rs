//! Pipeline topology from the lifecycle script

use crate::invocation::LifecycleScript;

/// Stage names of the recorded pipeline, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeTopology {
    stages: Vec<String>,
}

impl PipeTopology {
    pub fn new<I, S>(stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stages: stages.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads the topology from a lifecycle script; no script means no pipeline
    pub fn detect(script: Option<&LifecycleScript>) -> Self {
        script
            .map(|s| Self { stages: s.stages() })
            .unwrap_or_default()
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    /// True when `name` feeds a later stage and is not itself the last one
    pub fn is_piped(&self, name: &str) -> bool {
        match self.stages.split_last() {
            Some((last, upstream)) => last != name && upstream.iter().any(|s| s == name),
            None => false,
        }
    }

    /// True when `name` heads the recorded pipeline
    pub fn is_first_stage(&self, name: &str) -> bool {
        self.stages.first().is_some_and(|s| s == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_terminal_stages_are_piped() {
        let topology = PipeTopology::detect(Some(&LifecycleScript::new("toolA | toolB | toolC")));

        assert!(topology.is_piped("toolA"));
        assert!(topology.is_piped("toolB"));
        assert!(!topology.is_piped("toolC"));
    }

    #[test]
    fn logical_or_does_not_pipe() {
        let topology =
            PipeTopology::detect(Some(&LifecycleScript::new("toolA --source x || toolB")));

        assert_eq!(topology.stages(), ["toolA"]);
        assert!(!topology.is_piped("toolA"));
    }

    #[test]
    fn unknown_name_is_not_piped() {
        let topology = PipeTopology::new(["toolA", "toolB"]);
        assert!(!topology.is_piped("toolZ"));
    }

    #[test]
    fn single_stage_is_not_piped() {
        let topology = PipeTopology::detect(Some(&LifecycleScript::new("toolA --source ./src")));

        assert!(!topology.is_piped("toolA"));
        assert!(topology.is_first_stage("toolA"));
    }

    #[test]
    fn last_stage_name_wins() {
        let topology = PipeTopology::new(["toolA", "toolA"]);
        assert!(!topology.is_piped("toolA"));
    }

    #[test]
    fn no_script_means_no_pipeline() {
        let topology = PipeTopology::detect(None);

        assert!(topology.stages().is_empty());
        assert!(!topology.is_piped("toolA"));
        assert!(!topology.is_first_stage("toolA"));
    }

    #[test]
    fn first_stage() {
        let topology = PipeTopology::new(["toolA", "toolB"]);

        assert!(topology.is_first_stage("toolA"));
        assert!(!topology.is_first_stage("toolB"));
    }
}
