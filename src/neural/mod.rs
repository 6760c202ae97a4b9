pub mod activation;
pub mod trainer;

use crate::matrix::{ops::Dot, Matrix2};
use crate::prelude::*;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use self::activation::{activation, activation_derivative};

/// Learning constants shared by every weight update of a [`Net`].
#[derive(Debug, Clone, Copy)]
pub struct Hyperparams {
    eta: f64,
    alpha: f64,
    smoothing: f64,
}

impl Default for Hyperparams {
    /// Learning rate 0.3, momentum 0.3, no error smoothing.
    fn default() -> Self {
        Self {
            eta: 0.3,
            alpha: 0.3,
            smoothing: 0.0,
        }
    }
}

impl Hyperparams {
    /// Sets the learning rate.
    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    /// Sets the momentum, the fraction of the previous weight change
    /// carried into the current one.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the recent-error smoothing factor. At 0.0 the recent average
    /// equals the latest sample's error.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }
}

/// One rank of units: their activations and, during training, their error
/// gradients.
#[derive(Debug, Clone)]
struct Layer {
    values: Vec<f64>,
    gradients: Vec<f64>,
    has_bias: bool,
}

impl Layer {
    fn new(units: usize, has_bias: bool) -> Self {
        let len = units + has_bias as usize;
        let mut values = vec![0.0; len];
        if has_bias {
            // The bias output is pinned here and never recomputed.
            values[len - 1] = 1.0;
        }
        Self {
            values,
            gradients: vec![0.0; len],
            has_bias,
        }
    }

    /// Number of units, bias included.
    fn len(&self) -> usize {
        self.values.len()
    }

    /// Number of units excluding the bias; only these are ever fed from a
    /// predecessor or used as backprop targets.
    fn trainable_len(&self) -> usize {
        self.values.len() - self.has_bias as usize
    }

    fn trainable_values(&self) -> &[f64] {
        &self.values[..self.trainable_len()]
    }
}

/// The full connection state between two adjacent layers: one weight and
/// one momentum delta per (previous unit, next trainable unit) pair.
#[derive(Debug, Clone)]
struct Connections {
    weights: Matrix2<f64>,
    deltas: Matrix2<f64>,
}

impl Connections {
    fn with_rng<R: Rng + ?Sized>(prev_units: usize, next_units: usize, rng: &mut R) -> Self {
        let die = Uniform::from(0.0..1.0);
        Self {
            weights: Matrix2::from_fn(prev_units, next_units, |_, _| die.sample(rng)),
            deltas: Matrix2::new(prev_units, next_units),
        }
    }
}

/// A bias-augmented multilayer perceptron trained online by
/// backpropagation with momentum.
#[derive(Debug, Clone)]
pub struct Net {
    layers: Vec<Layer>,
    connections: Vec<Connections>,
    hyper: Hyperparams,
    recent_avg_error: f64,
}

impl Net {
    /// Creates a network with the given layer sizes (input to output, bias
    /// units not counted) and freshly randomized weights.
    pub fn new(topology: &[usize], hyper: Hyperparams) -> Result<Self> {
        Self::with_rng(topology, hyper, &mut rand::thread_rng())
    }

    /// Like [`Net::new`] with a fixed seed, for reproducible runs.
    pub fn from_seed(topology: &[usize], hyper: Hyperparams, seed: u64) -> Result<Self> {
        Self::with_rng(topology, hyper, &mut StdRng::seed_from_u64(seed))
    }

    /// Creates a network drawing its initial weights from `rng`, uniformly
    /// in [0, 1).
    pub fn with_rng<R: Rng + ?Sized>(
        topology: &[usize],
        hyper: Hyperparams,
        rng: &mut R,
    ) -> Result<Self> {
        if topology.len() < 2 {
            return Err(Error::DimensionErr);
        }

        // Every layer carries a structural bias unit; the output layer's is
        // simply never read.
        let layers = topology
            .iter()
            .map(|&units| Layer::new(units, true))
            .collect();
        let connections = topology
            .windows(2)
            .map(|pair| Connections::with_rng(pair[0] + 1, pair[1], rng))
            .collect();

        Ok(Self {
            layers,
            connections,
            hyper,
            recent_avg_error: 0.0,
        })
    }

    /// Width of the input layer, bias excluded.
    pub fn input_len(&self) -> usize {
        self.layers[0].trainable_len()
    }

    /// Width of the output layer, bias excluded.
    pub fn output_len(&self) -> usize {
        self.layers[self.layers.len() - 1].trainable_len()
    }

    /// Propagates `inputs` through the network, layer by layer.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<()> {
        if inputs.len() != self.input_len() {
            return Err(Error::DimensionErr);
        }

        self.layers[0].values[..inputs.len()].copy_from_slice(inputs);

        for l in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(l);
            let prev = &before[l - 1];
            let cur = &mut after[0];

            // Input sums run over the whole previous layer, bias included;
            // the current layer's own bias keeps its pinned output.
            let sums = prev.values[..].dot(&self.connections[l - 1].weights)?;
            for (unit, sum) in sums.into_iter().enumerate() {
                cur.values[unit] = activation(sum);
            }
        }

        Ok(())
    }

    /// Adjusts every weight from one labeled sample and folds the sample's
    /// RMS error into the recent average.
    ///
    /// Must follow a [`Net::forward`] call for the same sample.
    pub fn backpropagate(&mut self, targets: &[f64]) -> Result<()> {
        if targets.len() != self.output_len() {
            return Err(Error::DimensionErr);
        }

        let last = self.layers.len() - 1;

        // RMS error over the output layer's trainable units.
        let output = &self.layers[last];
        let mut error = 0.0;
        for (unit, &target) in targets.iter().enumerate() {
            let delta = target - output.values[unit];
            error += delta * delta;
        }
        error /= output.trainable_len() as f64;
        let error = error.sqrt();

        self.recent_avg_error =
            (self.recent_avg_error * self.hyper.smoothing + error) / (self.hyper.smoothing + 1.0);

        // Output-layer gradients.
        let output = &mut self.layers[last];
        for (unit, &target) in targets.iter().enumerate() {
            output.gradients[unit] =
                (target - output.values[unit]) * activation_derivative(output.values[unit]);
        }

        // Hidden-layer gradients, walking back from the last hidden layer;
        // each layer needs the following layer's gradients already in place.
        for l in (1..last).rev() {
            let (before, after) = self.layers.split_at_mut(l + 1);
            let cur = &mut before[l];
            let next = &after[0];
            let weights = &self.connections[l].weights;

            for unit in 0..cur.len() {
                // Sum of downstream gradients weighted by this unit's
                // outgoing weights; the next layer's bias is not a target.
                let dow: f64 = weights
                    .row(unit)
                    .iter()
                    .zip(&next.gradients)
                    .map(|(weight, gradient)| weight * gradient)
                    .sum();
                cur.gradients[unit] = dow * activation_derivative(cur.values[unit]);
            }
        }

        // Weight updates, output layer back to the first hidden layer. A
        // layer's update mutates the connections feeding it from below.
        for l in (1..=last).rev() {
            let prev = &self.layers[l - 1];
            let cur = &self.layers[l];
            let conn = &mut self.connections[l - 1];

            for unit in 0..cur.trainable_len() {
                for p in 0..prev.len() {
                    let new_delta = self.hyper.eta * prev.values[p] * cur.gradients[unit]
                        + self.hyper.alpha * conn.deltas[(p, unit)];
                    conn.deltas[(p, unit)] = new_delta;
                    conn.weights[(p, unit)] += new_delta;
                }
            }
        }

        Ok(())
    }

    /// The output layer's activations, bias excluded.
    pub fn results(&self) -> Vec<f64> {
        self.layers[self.layers.len() - 1]
            .trainable_values()
            .to_vec()
    }

    /// The exponentially-smoothed error across every sample trained so far.
    pub fn recent_average_error(&self) -> f64 {
        self.recent_avg_error
    }
}
