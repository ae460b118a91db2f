//! Range interpolation for derived animated values

use crate::value::{AnimatedNode, ValueCell};

/// What happens to inputs outside the input range
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Extrapolate {
    /// Keep following the line through the range endpoints
    #[default]
    Extend,
    /// Pin to the nearest range endpoint
    Clamp,
    /// Return the input unchanged
    Identity,
}

/// Linear mapping from an input range to an output range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpolation {
    pub input: (f32, f32),
    pub output: (f32, f32),
    pub extrapolate_left: Extrapolate,
    pub extrapolate_right: Extrapolate,
}

impl Interpolation {
    pub fn new(input: (f32, f32), output: (f32, f32)) -> Self {
        Self {
            input,
            output,
            extrapolate_left: Extrapolate::Extend,
            extrapolate_right: Extrapolate::Extend,
        }
    }

    /// Use the same extrapolation on both ends
    pub fn extrapolate(mut self, mode: Extrapolate) -> Self {
        self.extrapolate_left = mode;
        self.extrapolate_right = mode;
        self
    }

    pub fn clamp(self) -> Self {
        self.extrapolate(Extrapolate::Clamp)
    }

    /// Map `x` through the interpolation
    pub fn map(&self, x: f32) -> f32 {
        let (input_min, input_max) = self.input;
        let (output_min, output_max) = self.output;
        let mut result = x;

        if result < input_min {
            match self.extrapolate_left {
                Extrapolate::Identity => return result,
                Extrapolate::Clamp => result = input_min,
                Extrapolate::Extend => {}
            }
        }
        if result > input_max {
            match self.extrapolate_right {
                Extrapolate::Identity => return result,
                Extrapolate::Clamp => result = input_max,
                Extrapolate::Extend => {}
            }
        }

        if output_min == output_max {
            return output_min;
        }

        // Degenerate input range: step at the single input point
        if input_min == input_max {
            return if x <= input_min { output_min } else { output_max };
        }

        let progress = (result - input_min) / (input_max - input_min);
        output_min + progress * (output_max - output_min)
    }
}

/// An animated value seen through an [`Interpolation`]
///
/// Reads the source live, so it tracks the animation frame by frame.
#[derive(Clone, Debug)]
pub struct AnimatedInterpolation {
    source: ValueCell,
    interpolation: Interpolation,
}

impl AnimatedInterpolation {
    pub fn new(source: ValueCell, interpolation: Interpolation) -> Self {
        Self {
            source,
            interpolation,
        }
    }

    pub fn interpolation(&self) -> &Interpolation {
        &self.interpolation
    }
}

impl AnimatedNode for AnimatedInterpolation {
    fn current(&self) -> f32 {
        self.interpolation.map(self.source.get())
    }
}
