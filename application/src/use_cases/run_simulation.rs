//! Run Simulation use case
//!
//! Drives the round loop. Each round:
//!
//! 1. Snapshot the state (`state_before`)
//! 2. Every evaluator acts on the snapshot, in registration order
//! 3. The resolver merges the proposals
//! 4. Optionally sample one noise value scaled by the volatility field
//! 5. Apply the merged deltas and noise (`state_after`)
//! 6. Record the round
//!
//! The loop is sequential and deterministic: a run reseeds its random
//! source from [`SimulationParams::seed`], so the same seed, evaluators and
//! configuration always reproduce the same [`RunTrace`].

use crate::config::SimulationParams;
use crate::ports::round_observer::{NoObserver, RoundObserver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use roundtable_domain::{
    ConsensusResolver, DomainError, Evaluator, EvaluatorSeat, RoundRecord, RunTrace, StateStore,
    StateVector,
};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a simulation run
#[derive(Error, Debug)]
pub enum RunSimulationError {
    #[error("noise factor must be finite and non-negative, got {0}")]
    InvalidNoiseFactor(f64),

    #[error("round {round} aborted: {source}")]
    RoundAborted {
        round: usize,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Use case for running a multi-round simulation
///
/// Owns the state store, the evaluator seats and the resolver. Only this
/// use case mutates the store, once per round.
#[derive(Debug)]
pub struct RunSimulationUseCase {
    store: StateStore,
    seats: Vec<EvaluatorSeat>,
    resolver: ConsensusResolver,
    params: SimulationParams,
}

impl RunSimulationUseCase {
    /// Wire a simulation, validating the static setup
    ///
    /// Rejects a negative or non-finite noise factor, a volatility field the
    /// state does not have, and two evaluators with the same name.
    pub fn new(
        store: StateStore,
        evaluators: Vec<Box<dyn Evaluator>>,
        resolver: ConsensusResolver,
        params: SimulationParams,
    ) -> Result<Self, RunSimulationError> {
        if !(params.noise_factor.is_finite() && params.noise_factor >= 0.0) {
            return Err(RunSimulationError::InvalidNoiseFactor(params.noise_factor));
        }

        if store.snapshot().get(&params.volatility_field).is_none() {
            return Err(DomainError::UnknownVolatilityField(params.volatility_field.clone()).into());
        }

        let mut seen = BTreeSet::new();
        for evaluator in &evaluators {
            if !seen.insert(evaluator.name().to_string()) {
                return Err(DomainError::DuplicateProducer(evaluator.name().to_string()).into());
            }
        }

        let seats: Vec<EvaluatorSeat> = evaluators.into_iter().map(EvaluatorSeat::new).collect();
        for seat in &seats {
            if !resolver.weights().contains(seat.name()) {
                warn!(
                    "No negotiation weight for {}, using default {}",
                    seat.name(),
                    resolver.weights().weight_of(seat.name())
                );
            }
        }

        Ok(Self {
            store,
            seats,
            resolver,
            params,
        })
    }

    /// Execute a run with no progress reporting
    pub fn run(
        &mut self,
        n_rounds: usize,
        scenario: impl Into<String>,
        stochastic: bool,
    ) -> Result<RunTrace, RunSimulationError> {
        self.run_with_observer(n_rounds, scenario, stochastic, &NoObserver)
    }

    /// Execute a run with progress callbacks
    ///
    /// Resets the store and every evaluator, then plays exactly `n_rounds`
    /// rounds. There is no early exit.
    pub fn run_with_observer(
        &mut self,
        n_rounds: usize,
        scenario: impl Into<String>,
        stochastic: bool,
        observer: &dyn RoundObserver,
    ) -> Result<RunTrace, RunSimulationError> {
        let scenario = scenario.into();

        self.store.reset(None)?;
        for seat in &mut self.seats {
            seat.reset();
        }
        let mut rng = StdRng::seed_from_u64(self.params.seed);

        info!(
            "Starting '{}': {} rounds, {} evaluators, stochastic={}, seed={}",
            scenario,
            n_rounds,
            self.seats.len(),
            stochastic,
            self.params.seed
        );
        observer.on_run_start(n_rounds, &scenario);

        let initial_state = self.store.snapshot();
        let mut rounds = Vec::with_capacity(n_rounds);

        for round in 1..=n_rounds {
            let record = self.play_round(round, stochastic, &mut rng)?;
            observer.on_round_complete(&record);
            rounds.push(record);
        }

        let trace = RunTrace::new(scenario, initial_state, self.store.snapshot(), rounds);
        info!(
            "Finished '{}' after {} rounds (mean confidence {:.3})",
            trace.scenario,
            trace.n_rounds(),
            trace.mean_confidence()
        );
        observer.on_run_complete(&trace);

        Ok(trace)
    }

    /// Evaluator seats in registration order, with their audit history
    pub fn seats(&self) -> &[EvaluatorSeat] {
        &self.seats
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn resolver(&self) -> &ConsensusResolver {
        &self.resolver
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    fn play_round(
        &mut self,
        round: usize,
        stochastic: bool,
        rng: &mut StdRng,
    ) -> Result<RoundRecord, RunSimulationError> {
        let state_before = self.store.snapshot();

        let proposals = self
            .seats
            .iter_mut()
            .map(|seat| seat.act(&state_before))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| RunSimulationError::RoundAborted { round, source })?;

        let outcome = self.resolver.resolve(&proposals);
        for conflict in &outcome.conflicts {
            warn!(
                "Round {}: {} and {} disagree on {} (severity {:.2})",
                round,
                conflict.producer_a,
                conflict.producer_b,
                conflict.fields.join(", "),
                conflict.severity
            );
        }

        let noise = if stochastic {
            self.sample_noise(&state_before, rng)
        } else {
            0.0
        };

        let state_after = self.store.apply(&outcome.final_deltas, noise);

        debug!(
            "Round {}: {} fields merged, {} conflicts, confidence {:.4}, noise {:.6}",
            round,
            outcome.final_deltas.len(),
            outcome.conflicts.len(),
            outcome.confidence_index,
            noise
        );

        Ok(RoundRecord {
            round,
            proposals,
            outcome,
            state_before,
            state_after,
            noise,
        })
    }

    /// One zero-mean normal draw with `sd = |volatility| × noise_factor`
    fn sample_noise(&self, state: &StateVector, rng: &mut StdRng) -> f64 {
        let volatility = state.get_or(&self.params.volatility_field, 0.0);
        let sigma = volatility.abs() * self.params.noise_factor;
        let z: f64 = rng.sample(StandardNormal);
        z * sigma
    }
}
