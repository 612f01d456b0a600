//! Decomposition configuration.
//!
//! [`DecompositionConfig`] is the serializable description (TOML) of which
//! strategy inverts matrices and with which threshold.
//! [`DecompositionContext`] is the live value built from it. A process-wide
//! default context exists so that `DecomposedSpdMatrix::inverse()` needs no
//! argument, but it is only ever read or replaced explicitly, and every call
//! that uses it has a variant taking a strategy directly.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use orbis_types::constants::DEFAULT_SINGULARITY_THRESHOLD;
use orbis_types::{OrbisError, OrbisResult};

use crate::decomposition::{CholeskyStrategy, DecompositionStrategy, EigenStrategy, LuStrategy};

/// Available decomposition strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Dense LLᵗ.
    #[default]
    Cholesky,
    /// Self-adjoint eigendecomposition.
    Eigen,
    /// Partially pivoted LU.
    Lu,
}

/// Configuration for matrix inversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// Strategy used by `inverse()`.
    pub strategy: StrategyKind,

    /// Relative pivot/eigenvalue threshold under which a matrix is
    /// reported singular.
    pub singularity_threshold: f64,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Cholesky,
            singularity_threshold: DEFAULT_SINGULARITY_THRESHOLD,
        }
    }
}

impl DecompositionConfig {
    /// Cholesky with the default threshold.
    pub fn fast() -> Self {
        Self::default()
    }

    /// Eigendecomposition with a tighter threshold.
    pub fn robust() -> Self {
        Self {
            strategy: StrategyKind::Eigen,
            singularity_threshold: 1e-14,
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> OrbisResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| OrbisError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!(strategy = ?config.strategy, threshold = config.singularity_threshold, "loaded decomposition config");
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> OrbisResult<String> {
        toml::to_string(self).map_err(|e| OrbisError::Serialization(e.to_string()))
    }

    /// Checks that the threshold is finite and in `[0, 1)`.
    pub fn validate(&self) -> OrbisResult<()> {
        if !self.singularity_threshold.is_finite() || self.singularity_threshold < 0.0 {
            return Err(OrbisError::InvalidConfig(format!(
                "singularity_threshold must be a non-negative number, got {}",
                self.singularity_threshold
            )));
        }
        if self.singularity_threshold >= 1.0 {
            return Err(OrbisError::InvalidConfig(format!(
                "singularity_threshold must be below 1, got {}",
                self.singularity_threshold
            )));
        }
        Ok(())
    }

    /// Instantiates the configured strategy.
    pub fn build_strategy(&self) -> Arc<dyn DecompositionStrategy> {
        let singularity_threshold = self.singularity_threshold;
        match self.strategy {
            StrategyKind::Cholesky => Arc::new(CholeskyStrategy { singularity_threshold }),
            StrategyKind::Eigen => Arc::new(EigenStrategy { singularity_threshold }),
            StrategyKind::Lu => Arc::new(LuStrategy { singularity_threshold }),
        }
    }
}

/// Live decomposition settings.
#[derive(Debug, Clone)]
pub struct DecompositionContext {
    strategy: Arc<dyn DecompositionStrategy>,
}

static GLOBAL_CONTEXT: OnceLock<RwLock<DecompositionContext>> = OnceLock::new();

fn global_slot() -> &'static RwLock<DecompositionContext> {
    GLOBAL_CONTEXT.get_or_init(|| RwLock::new(DecompositionContext::default()))
}

impl DecompositionContext {
    /// Context using the given strategy.
    pub fn new(strategy: Arc<dyn DecompositionStrategy>) -> Self {
        Self { strategy }
    }

    /// Validates a configuration and builds its context.
    pub fn from_config(config: &DecompositionConfig) -> OrbisResult<Self> {
        config.validate()?;
        Ok(Self::new(config.build_strategy()))
    }

    /// The strategy of this context.
    pub fn strategy(&self) -> &dyn DecompositionStrategy {
        self.strategy.as_ref()
    }

    /// Current process-wide default.
    pub fn global() -> Self {
        global_slot().read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replaces the process-wide default and returns the previous one.
    pub fn set_global(context: DecompositionContext) -> DecompositionContext {
        tracing::debug!(strategy = context.strategy.name(), "installing global decomposition context");
        let mut slot = global_slot().write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, context)
    }
}

impl Default for DecompositionContext {
    fn default() -> Self {
        Self::new(Arc::new(CholeskyStrategy::default()))
    }
}
