//! A minimal supervised-learning engine: a fully-connected,
//! bias-augmented multilayer perceptron trained by online
//! backpropagation with momentum, fed from labeled training-record
//! files.

pub mod data;
pub mod matrix;
pub mod neural;
pub mod prelude;
