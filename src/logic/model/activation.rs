//! Activation functions shared by the network and the sigmoid penalty model

/// `exp` argument bound, keeps f32 away from overflow
pub const SIGMOID_CLAMP: f32 = 60.0;

pub fn relu(x: f32) -> f32 {
    x.max(0.0)
}

pub fn relu_derivative(x: f32) -> f32 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

/// Logistic sigmoid with the argument clamped to ±`SIGMOID_CLAMP`
pub fn sigmoid(x: f32) -> f32 {
    let x = if x.is_nan() { 0.0 } else { x.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP) };
    1.0 / (1.0 + (-x).exp())
}

pub fn sigmoid_derivative(x: f32) -> f32 {
    let s = sigmoid(x);
    s * (1.0 - s)
}
