//! Self-adaptive differential evolution for constrained black-box
//! optimization: a plain DE driver with a fixed strategy, and a SaDE
//! controller that samples a strategy per slot and adapts its own
//! parameters online from rolling success/failure and CR-history
//! memories.

pub mod bounds;
pub mod crossover;
pub mod driver;
pub mod error;
pub mod mutation;
pub mod population;
pub mod progress;
pub mod recorder;
pub mod rng;
pub mod sade;
pub mod selector;

pub use bounds::Range;
pub use crossover::Crossover;
pub use driver::{DeConfig, DifferentialEvolutionDriver, Objective};
pub use error::{ConfigError, EngineError};
pub use mutation::Mutator;
pub use population::{Evaluation, Population, PopulationView};
pub use progress::{GenerationCallback, GenerationReport};
pub use recorder::ProgressRecorder;
pub use rng::Rng64;
pub use sade::{default_strategy_pool, SadeConfig, SadeDriver, Strategy};
pub use selector::{Epsilon, Selector};
