//! Genetic Algorithm framework.
//!
//! A generic GA loop built on trait-based abstractions. The timetabling
//! engine plugs into it by implementing [`GaProblem`], which specifies how
//! to create, evaluate, cross and mutate individuals.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying its fitness (higher is better)
//! - [`GaProblem`]: Problem definition: initialization, evaluation and operators
//! - [`ProgressObserver`]: Per-generation progress sink whose failures are swallowed
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, presets)
//! - [`Evolution`]: Stepwise state machine (seed, evaluate, reproduce)
//! - [`GaRunner`]: Runs the loop to completion under generation/time budgets
//! - [`GaResult`]: Best-ever individual with run statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod progress;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use progress::{GenerationProgress, ObserverError, ProgressObserver};
pub use runner::{Evolution, EvolutionState, GaResult, GaRunner};
pub use selection::Selection;
pub use types::{GaProblem, Individual};
