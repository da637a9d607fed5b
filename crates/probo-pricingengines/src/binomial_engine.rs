//! Binomial lattice engine for European and American exercise.

use probo_core::{ensure, errors::Result, CancellationToken, Real};
use probo_instruments::{PricingEngine, PricingResults, VanillaOptionArguments};
use probo_methods::lattice::{price_american, price_european, BinomialTree};
use probo_processes::{BlackScholesProcess, MarketData};
use tracing::debug;

/// Exercise style valued by a [`BinomialEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinomialPricer {
    /// Exercise at expiry only: discounted expectation over the terminal
    /// layer.
    European,
    /// Exercise at any node: backward induction with early exercise.
    American,
}

/// Prices options on a recombining binomial tree with a fixed number of
/// steps.
#[derive(Debug, Clone)]
pub struct BinomialEngine {
    steps: usize,
    pricer: BinomialPricer,
    cancellation: Option<CancellationToken>,
}

impl BinomialEngine {
    /// Create an engine with `steps` time steps. `steps` must be at least 1.
    pub fn new(steps: usize, pricer: BinomialPricer) -> Result<Self> {
        ensure!(steps >= 1, "steps must be at least 1, got {steps}");
        Ok(Self {
            steps,
            pricer,
            cancellation: None,
        })
    }

    /// Check `token` between lattice layers.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Exercise style.
    pub fn pricer(&self) -> BinomialPricer {
        self.pricer
    }
}

impl PricingEngine for BinomialEngine {
    fn calculate(&self, args: &VanillaOptionArguments, data: &MarketData) -> Result<PricingResults> {
        let process = BlackScholesProcess::new(data);
        let tree = BinomialTree::new(&process, args.expiry, self.steps)?;
        let payoff = |spot: Real| args.payoff(spot);

        let price = match self.pricer {
            BinomialPricer::European => price_european(&tree, &payoff)?,
            BinomialPricer::American => {
                price_american(&tree, &payoff, self.cancellation.as_ref())?
            }
        };
        debug!(
            pricer = ?self.pricer,
            steps = self.steps,
            price,
            "binomial lattice price"
        );

        Ok(PricingResults::from_price(price))
    }
}
