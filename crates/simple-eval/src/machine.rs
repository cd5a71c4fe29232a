//! The small-step machine: drives [`reduce`] to a fixed point.
//!
//! A machine configuration is a `(statement, environment)` pair. Each step
//! replaces the pair with the result of reducing it; the run stops at the
//! first configuration whose statement is no longer reducible. Termination
//! is not guaranteed, so callers that need a bound set
//! [`MachineConfig::step_limit`].

use crate::env::Environment;
use crate::error::{EvalError, EvalResult, RunResult, Violation};
use crate::reduce::reduce;
use serde::{Deserialize, Serialize};
use simple_types::Node;
use std::fmt;
use std::io::{self, Write};

// ══════════════════════════════════════════════════════════════════════════════
// State
// ══════════════════════════════════════════════════════════════════════════════

/// One machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub statement: Node,
    pub environment: Environment,
}

impl State {
    pub fn new(statement: Node, environment: Environment) -> Self {
        Self {
            statement,
            environment,
        }
    }

    /// True once the statement admits no further rewrite.
    pub fn is_terminal(&self) -> bool {
        !self.statement.reducible()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.statement, self.environment)
    }
}

/// The transition function. Pure: `state` is left untouched.
pub fn step(state: &State) -> EvalResult<State> {
    let (statement, environment) = reduce(&state.statement, &state.environment)?;
    Ok(State {
        statement,
        environment,
    })
}

// ══════════════════════════════════════════════════════════════════════════════
// Configuration
// ══════════════════════════════════════════════════════════════════════════════

/// How trace lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    /// `statement, environment` per line, then a blank line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Machine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Maximum number of steps a run may take. `None` runs until the
    /// statement stops being reducible, which may be never.
    pub step_limit: Option<u64>,
    pub trace_format: TraceFormat,
}

impl MachineConfig {
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn with_trace_format(mut self, format: TraceFormat) -> Self {
        self.trace_format = format;
        self
    }

    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Serialize)]
struct TraceRecord<'a> {
    step: u64,
    statement: String,
    environment: &'a Environment,
}

// ══════════════════════════════════════════════════════════════════════════════
// Machine
// ══════════════════════════════════════════════════════════════════════════════

/// Holds the current configuration and rebinds it on every step.
#[derive(Debug, Clone)]
pub struct Machine {
    state: State,
    steps: u64,
    config: MachineConfig,
}

impl Machine {
    /// Create an unbounded machine.
    pub fn new(statement: Node, environment: Environment) -> Self {
        Self::with_config(statement, environment, MachineConfig::default())
    }

    pub fn with_config(statement: Node, environment: Environment, config: MachineConfig) -> Self {
        Self {
            state: State::new(statement, environment),
            steps: 0,
            config,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn statement(&self) -> &Node {
        &self.state.statement
    }

    pub fn environment(&self) -> &Environment {
        &self.state.environment
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn into_state(self) -> State {
        self.state
    }

    /// Advance by one reduction.
    ///
    /// Fails if the machine is already terminal or the step limit is spent.
    /// On failure the current state is left as it was.
    pub fn step(&mut self) -> EvalResult<()> {
        if self.is_terminal() {
            return Err(Violation::Irreducible {
                node: self.state.statement.render(),
            }
            .into());
        }
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                return Err(EvalError::StepLimitExceeded { limit });
            }
        }
        self.state = step(&self.state)?;
        self.steps += 1;
        Ok(())
    }

    /// Run to completion, tracing every state to stdout.
    pub fn run(self) -> RunResult<State> {
        let stdout = io::stdout();
        let mut sink = stdout.lock();
        self.run_traced(&mut sink)
    }

    /// Run to completion, tracing every state to `sink`.
    pub fn run_traced<W: Write>(mut self, sink: &mut W) -> RunResult<State> {
        tracing::debug!(statement = %self.state.statement, "machine run started");
        loop {
            self.write_trace(sink)?;
            if self.is_terminal() {
                break;
            }
            self.step()?;
        }
        if self.config.trace_format == TraceFormat::Text {
            writeln!(sink)?;
        }
        tracing::debug!(steps = self.steps, "machine run finished");
        Ok(self.state)
    }

    /// Run to completion without writing a trace.
    pub fn run_silent(mut self) -> EvalResult<State> {
        tracing::debug!(statement = %self.state.statement, "machine run started");
        while !self.is_terminal() {
            self.step()?;
        }
        tracing::debug!(steps = self.steps, "machine run finished");
        Ok(self.state)
    }

    /// Run to completion, collecting every state from initial to terminal.
    pub fn into_trace(mut self) -> EvalResult<Vec<State>> {
        let mut states = vec![self.state.clone()];
        while !self.is_terminal() {
            self.step()?;
            states.push(self.state.clone());
        }
        Ok(states)
    }

    fn write_trace<W: Write>(&self, sink: &mut W) -> RunResult<()> {
        match self.config.trace_format {
            TraceFormat::Text => writeln!(sink, "{}", self.state)?,
            TraceFormat::Json => {
                let record = TraceRecord {
                    step: self.steps,
                    statement: self.state.statement.render(),
                    environment: &self.state.environment,
                };
                serde_json::to_writer(&mut *sink, &record).map_err(io::Error::from)?;
                writeln!(sink)?;
            }
        }
        Ok(())
    }
}
