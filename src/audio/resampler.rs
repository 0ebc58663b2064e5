use crate::{HubbubError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

/// Mono resampler used to bring captured audio down to the recognizer rate.
pub struct MonoResampler {
    resampler: SincFixedIn<f32>,
    input_rate: u32,
    output_rate: u32,
}

impl MonoResampler {
    pub fn new(input_rate: u32, output_rate: u32) -> Result<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(HubbubError::ConfigError(
                "Sample rates must be greater than 0".into(),
            ));
        }

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        // Frames consumed per process() call
        let chunk_size = 1024;

        let resampler = SincFixedIn::<f32>::new(
            output_rate as f64 / input_rate as f64,
            2.0,
            params,
            chunk_size,
            1,
        )
        .map_err(|e| HubbubError::ConfigError(format!("Failed to create resampler: {}", e)))?;

        debug!("Created resampler: {} Hz -> {} Hz", input_rate, output_rate);

        Ok(Self {
            resampler,
            input_rate,
            output_rate,
        })
    }

    /// Resample a whole mono buffer in one call.
    ///
    /// The trailing partial chunk is zero-padded in and trimmed back out, so
    /// the output length tracks `input.len() * output_rate / input_rate`.
    pub fn resample(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = self.resampler.input_frames_max();
        let ratio = self.output_rate as f64 / self.input_rate as f64;
        let mut output = Vec::with_capacity((input.len() as f64 * ratio * 1.1) as usize);

        for chunk in input.chunks(chunk_size) {
            // SincFixedIn wants exactly chunk_size frames per call
            let mut frames = vec![vec![0.0f32; chunk_size]];
            frames[0][..chunk.len()].copy_from_slice(chunk);

            let processed = self
                .resampler
                .process(&frames, None)
                .map_err(|e| HubbubError::RecognitionError(format!("Resampling failed: {}", e)))?;

            let produced = processed[0].len();
            let wanted = if chunk.len() < chunk_size {
                // Trailing chunk: keep only the part matching real input
                ((chunk.len() as f64) * ratio).ceil() as usize
            } else {
                produced
            };

            output.extend_from_slice(&processed[0][..wanted.min(produced)]);
        }

        debug!("Resampled {} -> {} frames", input.len(), output.len());

        Ok(output)
    }

    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }
}

/// One-shot convenience wrapper
pub fn resample_to(input: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>> {
    if input_rate == output_rate {
        return Ok(input.to_vec());
    }

    MonoResampler::new(input_rate, output_rate)?.resample(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rates_rejected() {
        assert!(MonoResampler::new(0, 16000).is_err());
        assert!(MonoResampler::new(48000, 0).is_err());
    }

    #[test]
    fn test_downsampling_shrinks_buffer() {
        let mut resampler = MonoResampler::new(48000, 16000).unwrap();
        let input: Vec<f32> = (0..4800).map(|i| (i as f32 * 0.01).sin()).collect();
        let output = resampler.resample(&input).unwrap();
        assert!(!output.is_empty());
        assert!(output.len() < input.len());
    }

    #[test]
    fn test_same_rate_is_passthrough() {
        let input: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let output = resample_to(&input, 16000, 16000).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_empty_input() {
        let mut resampler = MonoResampler::new(48000, 16000).unwrap();
        assert!(resampler.resample(&[]).unwrap().is_empty());
    }
}
