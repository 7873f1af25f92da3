use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, linalg};
use serde::Deserialize;

use super::{
    activations::{sigmoid, sigmoid_prime},
    loss::total_error,
};
use crate::{MlErr, Result, initialization::ParamGen};

/// The dimensions of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Dims {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Dims {
    pub const fn new(inputs: usize, hidden: usize, outputs: usize) -> Self {
        Self {
            inputs,
            hidden,
            outputs,
        }
    }

    /// The amount of weights of both layers.
    pub const fn weight_count(&self) -> usize {
        self.hidden * self.inputs + self.outputs * self.hidden
    }
}

/// A fully connected network with a single sigmoid hidden layer.
///
/// Both weight matrices live in a single buffer: the first `hidden * inputs`
/// values are the input to hidden weights (one row per hidden unit), the rest
/// are the hidden to output weights (one row per output). Each layer has a
/// single bias shared by all its units, biases are never trained.
#[derive(Debug, Clone)]
pub struct Network {
    dims: Dims,
    weights: Vec<f32>,
    biases: [f32; 2],
    hidden: Vec<f32>,
    output: Vec<f32>,
}

impl Network {
    /// Creates a new `Network` taking its parameters from `param_gen`.
    ///
    /// Weights are requested first, then the hidden and output biases.
    ///
    /// # Arguments
    /// * `dims` - The dimensions of the network.
    /// * `param_gen` - The source of the initial parameters.
    ///
    /// # Returns
    /// A new `Network` or the error of the source.
    pub fn new<G: ParamGen + ?Sized>(dims: Dims, param_gen: &mut G) -> Result<Self> {
        let mut weights = vec![0.; dims.weight_count()];
        param_gen.fill_weights(&mut weights)?;
        let biases = param_gen.biases()?;

        Self::from_params(dims, weights, biases)
    }

    /// Creates a new `Network` from explicit parameters.
    ///
    /// # Arguments
    /// * `dims` - The dimensions of the network.
    /// * `weights` - Both weight matrices in the layout described above.
    /// * `biases` - The hidden and output biases.
    ///
    /// # Returns
    /// A new `Network` or a size mismatch if `weights` does not fit `dims`.
    pub fn from_params(dims: Dims, weights: Vec<f32>, biases: [f32; 2]) -> Result<Self> {
        if weights.len() != dims.weight_count() {
            return Err(MlErr::SizeMismatch {
                a: "weights",
                b: "dims",
                got: weights.len(),
                expected: dims.weight_count(),
            });
        }

        Ok(Self {
            dims,
            weights,
            biases,
            hidden: vec![0.; dims.hidden],
            output: vec![0.; dims.outputs],
        })
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn biases(&self) -> [f32; 2] {
        self.biases
    }

    /// The hidden activations of the last forward pass.
    pub fn hidden(&self) -> &[f32] {
        &self.hidden
    }

    /// The output activations of the last forward pass.
    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Gives a view of the weight buffer as both weight matrices.
    ///
    /// # Returns
    /// The input to hidden weights, shaped `(hidden, inputs)`, and the hidden
    /// to output weights, shaped `(outputs, hidden)`.
    pub fn view_weights(&self) -> (ArrayView2<'_, f32>, ArrayView2<'_, f32>) {
        let Dims {
            inputs,
            hidden,
            outputs,
        } = self.dims;

        let (w_in, w_out) = self.weights.split_at(hidden * inputs);
        let w_in = ArrayView2::from_shape((hidden, inputs), w_in).unwrap();
        let w_out = ArrayView2::from_shape((outputs, hidden), w_out).unwrap();
        (w_in, w_out)
    }

    /// Propagates `input` through the network.
    ///
    /// Only the activation buffers change.
    ///
    /// # Panics
    /// If `input` does not have `inputs` values.
    pub fn forward(&mut self, input: &[f32]) {
        assert_eq!(input.len(), self.dims.inputs, "wrong input length");

        let Dims {
            inputs,
            hidden,
            outputs,
        } = self.dims;

        let (w_in, w_out) = self.weights.split_at(hidden * inputs);
        let w_in = ArrayView2::from_shape((hidden, inputs), w_in).unwrap();
        let w_out = ArrayView2::from_shape((outputs, hidden), w_out).unwrap();
        let [b_hidden, b_output] = self.biases;

        let mut h = ArrayViewMut1::from(&mut self.hidden[..]);
        linalg::general_mat_vec_mul(1., &w_in, &ArrayView1::from(input), 0., &mut h);
        h.mapv_inplace(|z| sigmoid(z + b_hidden));

        let mut o = ArrayViewMut1::from(&mut self.output[..]);
        linalg::general_mat_vec_mul(1., &w_out, &h.view(), 0., &mut o);
        o.mapv_inplace(|z| sigmoid(z + b_output));
    }

    /// Adjusts the weights by one step of gradient descent on the half squared
    /// error of the last forward pass, which must have been run on `input`.
    ///
    /// Each hidden to output weight is updated in place, but the error routed
    /// back to the hidden unit uses its value from before the update.
    ///
    /// # Arguments
    /// * `input` - The input of the last forward pass.
    /// * `target` - The expected output.
    /// * `rate` - The learning rate.
    ///
    /// # Panics
    /// If `input` or `target` have the wrong length.
    pub fn backward(&mut self, input: &[f32], target: &[f32], rate: f32) {
        assert_eq!(input.len(), self.dims.inputs, "wrong input length");
        assert_eq!(target.len(), self.dims.outputs, "wrong target length");

        let Dims {
            inputs,
            hidden,
            outputs,
        } = self.dims;

        let (w_in, w_out) = self.weights.split_at_mut(hidden * inputs);
        let mut w_in = ArrayViewMut2::from_shape((hidden, inputs), w_in).unwrap();
        let mut w_out = ArrayViewMut2::from_shape((outputs, hidden), w_out).unwrap();

        for (i, &h) in self.hidden.iter().enumerate() {
            let mut sum = 0.;

            for (j, (&o, &t)) in self.output.iter().zip(target).enumerate() {
                let a = o - t;
                let b = sigmoid_prime(o);
                let w = &mut w_out[[j, i]];

                sum += a * b * *w;
                *w -= rate * a * b * h;
            }

            let dh = sigmoid_prime(h);
            for (w, &x) in w_in.row_mut(i).iter_mut().zip(input) {
                *w -= rate * sum * dh * x;
            }
        }
    }

    /// Trains the network on a single example.
    ///
    /// # Arguments
    /// * `input` - The example's input.
    /// * `target` - The expected output.
    /// * `rate` - The learning rate.
    ///
    /// # Returns
    /// The total error of the output computed before the weights changed.
    pub fn train(&mut self, input: &[f32], target: &[f32], rate: f32) -> f32 {
        self.forward(input);
        self.backward(input, target, rate);
        total_error(target, &self.output)
    }

    /// Runs a forward pass over `input`.
    ///
    /// # Returns
    /// The output activations, overwritten by the next pass.
    pub fn predict(&mut self, input: &[f32]) -> &[f32] {
        self.forward(input);
        &self.output
    }
}
