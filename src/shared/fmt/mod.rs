//! Display formatting for prices and limits handed to the rendering layer.

pub mod decimal;

pub use decimal::{fixed2, grouped, money, priced};
