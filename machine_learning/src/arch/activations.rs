/// The logistic function.
pub fn sigmoid(z: f32) -> f32 {
    1. / (1. + (-z).exp())
}

/// The derivative of the logistic function, given its output `a` instead of
/// its input.
pub fn sigmoid_prime(a: f32) -> f32 {
    a * (1. - a)
}
