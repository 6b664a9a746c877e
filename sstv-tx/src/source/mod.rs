pub mod oscillator;

pub use oscillator::{
    Oscillator,
    OscillatorState,
};
