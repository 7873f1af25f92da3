//! Where a network's initial parameters come from.

mod pretrained;
mod random;

pub use pretrained::Pretrained;
pub use random::RandParamGen;

use crate::Result;

/// A source of initial parameters for a `Network`.
///
/// The network asks for its weights first and for its biases afterwards, so
/// sources that draw from a generator consume it in that order.
///
/// [`Network`]: crate::arch::Network
pub trait ParamGen {
    /// Fills both weight matrices, laid out as in the network's buffer.
    fn fill_weights(&mut self, weights: &mut [f32]) -> Result<()>;

    /// The hidden and output biases.
    fn biases(&mut self) -> Result<[f32; 2]>;
}
