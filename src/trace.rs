use crate::simulator::StepEvent;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Step event with the index of the step that produced it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedStep {
    /// 1-based step index within the run
    pub step: usize,
    pub event: StepEvent,
}

/// Record of every transition of one simulation run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunTrace {
    steps: Vec<LoggedStep>,
}

impl RunTrace {
    pub fn new() -> Self {
        RunTrace { steps: Vec::new() }
    }

    pub fn record(&mut self, step: usize, event: StepEvent) {
        self.steps.push(LoggedStep { step, event });
    }

    pub fn steps(&self) -> &[LoggedStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_event(&self) -> Option<StepEvent> {
        self.steps.last().map(|logged| logged.event)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.steps)
    }

    /// Save trace to a JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut moves = 0;
        let mut turns = 0;

        for logged in &self.steps {
            match logged.event {
                StepEvent::Moved { .. } => moves += 1,
                StepEvent::Turned { .. } => turns += 1,
                _ => {}
            }
        }

        let terminal = match self.last_event() {
            Some(StepEvent::Exited { at, heading }) => {
                format!("exited from ({}, {}) heading {:?}", at.x, at.y, heading)
            }
            Some(StepEvent::Looped { at, heading }) => {
                format!("looped at ({}, {}) heading {:?}", at.x, at.y, heading)
            }
            Some(StepEvent::BudgetExceeded { steps }) => format!("budget exceeded after {} steps", steps),
            Some(_) => "still running".to_string(),
            None => "no steps".to_string(),
        };

        format!(
            "Total Steps: {}\n\
             Moves: {}, Turns: {}\n\
             Result: {}",
            self.steps.len(),
            moves,
            turns,
            terminal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Heading, Position};

    #[test]
    fn test_summary_counts_events() {
        let mut trace = RunTrace::new();
        trace.record(1, StepEvent::Turned { at: Position::new(0, 1), heading: Heading::Right });
        trace.record(
            2,
            StepEvent::Moved { from: Position::new(0, 1), to: Position::new(1, 1), heading: Heading::Right },
        );
        trace.record(3, StepEvent::Exited { at: Position::new(1, 1), heading: Heading::Right });

        let summary = trace.summary();
        assert!(summary.contains("Total Steps: 3"));
        assert!(summary.contains("Moves: 1, Turns: 1"));
        assert!(summary.contains("exited from (1, 1) heading Right"));
    }

    #[test]
    fn test_empty_trace() {
        let trace = RunTrace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.last_event(), None);
        assert!(trace.summary().contains("no steps"));
        assert_eq!(trace.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_json_names_events() {
        let mut trace = RunTrace::new();
        trace.record(1, StepEvent::Looped { at: Position::new(2, 3), heading: Heading::Up });

        let json = trace.to_json().unwrap();
        assert!(json.contains("\"Looped\""));
        assert!(json.contains("\"step\": 1"));
        assert!(json.contains("\"Up\""));
    }
}
