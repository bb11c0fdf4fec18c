//! Arena configuration file.
//!
//! Every section is optional; missing sections and fields keep their
//! defaults. Example:
//!
//! ```toml
//! [alphabeta]
//! max_depth = 4
//! transposition_table = true
//!
//! [mcts]
//! time_budget_ms = 2000
//! expansion = { kind = "uct", breadth = 10 }
//!
//! [weights]
//! material_term = "ratio"
//! ```

use std::path::Path;

use abalone_search::{
    AbaloneEvaluator, AlphaBetaConfig, HeuristicWeights, MctsConfig, OrderingWeights,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub alphabeta: AlphaBetaConfig,
    pub mcts: MctsConfig,
    pub weights: HeuristicWeights,
    pub ordering: OrderingWeights,
}

impl ArenaConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ArenaConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.alphabeta
            .validate()
            .context("Invalid [alphabeta] section")?;
        self.mcts.validate().context("Invalid [mcts] section")?;
        Ok(())
    }

    pub fn evaluator(&self) -> AbaloneEvaluator {
        AbaloneEvaluator::new(self.weights.clone(), self.ordering.clone())
    }
}
