//! Resampling to a common time step.
//!
//! Two waveforms can only be compared sample-by-sample once they share a
//! delta_t; the match engine resamples both to the coarser of the two steps.

use crate::error::{MatchError, MatchResult};

/// Check if two time steps are compatible (within relative tolerance).
#[inline]
pub fn are_compatible_dt(dt1: f64, dt2: f64, relative_tolerance: f64) -> bool {
    let max_dt = dt1.max(dt2);
    if max_dt == 0.0 {
        return dt1 == dt2;
    }
    (dt1 - dt2).abs() / max_dt < relative_tolerance
}

/// Resample a uniformly sampled real series to a new time step using
/// Catmull-Rom cubic interpolation.
///
/// The output covers the same span as the input: the first sample coincides
/// with the input's first sample and the last lands within one `new_dt` of
/// the input's final sample.
pub fn resample_uniform(samples: &[f64], old_dt: f64, new_dt: f64) -> MatchResult<Vec<f64>> {
    if samples.len() < 2 {
        return Err(MatchError::InsufficientData {
            needed: 2,
            got: samples.len(),
        });
    }
    if !old_dt.is_finite() || old_dt <= 0.0 || !new_dt.is_finite() || new_dt <= 0.0 {
        return Err(MatchError::InvalidArg {
            what: "time steps must be positive and finite",
        });
    }

    // Already at the target step
    if are_compatible_dt(old_dt, new_dt, 1e-10) {
        return Ok(samples.to_vec());
    }

    let n = samples.len();
    let span = (n - 1) as f64 * old_dt;
    let new_len = (span / new_dt).floor() as usize + 1;

    // Virtual points beyond the ends are linearly extrapolated so the
    // interpolant stays exact for linear data at the boundaries.
    let at = |i: isize| -> f64 {
        if i < 0 {
            let j = ((-i) as usize).min(n - 1);
            2.0 * samples[0] - samples[j]
        } else if (i as usize) >= n {
            let j = (i as usize - (n - 1)).min(n - 1);
            2.0 * samples[n - 1] - samples[n - 1 - j]
        } else {
            samples[i as usize]
        }
    };

    let mut resampled = Vec::with_capacity(new_len);
    for i in 0..new_len {
        let x = (i as f64 * new_dt) / old_dt;
        let i1 = x.floor() as isize;
        let u = x - i1 as f64;

        let p0 = at(i1 - 1);
        let p1 = at(i1);
        let p2 = at(i1 + 1);
        let p3 = at(i1 + 2);

        let value = 0.5
            * (2.0 * p1
                + (-p0 + p2) * u
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u * u
                + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * u * u * u);
        resampled.push(value);
    }

    Ok(resampled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatible_steps_pass_through() {
        let samples = vec![1.0, 2.0, 3.0, 4.0];
        let out = resample_uniform(&samples, 0.1, 0.1 * (1.0 + 1e-12)).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn constant_series_stays_constant() {
        let samples = vec![2.5; 100];
        let out = resample_uniform(&samples, 0.01, 0.013).unwrap();
        for v in out {
            assert!((v - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn linear_ramp_is_exact() {
        // Catmull-Rom reproduces polynomials up to degree 3 in the interior
        let samples: Vec<f64> = (0..50).map(|i| 0.7 * i as f64).collect();
        let out = resample_uniform(&samples, 1.0, 0.3).unwrap();
        for (i, v) in out.iter().enumerate() {
            assert!((v - 0.7 * (i as f64 * 0.3)).abs() < 1e-9);
        }
    }

    #[test]
    fn duration_preserved_within_one_sample() {
        let samples: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.01).sin()).collect();
        let old_dt = 1.0 / 4096.0;
        for new_dt in [1.0 / 2048.0, 1.0 / 1000.0, 1.0 / 4100.0] {
            let out = resample_uniform(&samples, old_dt, new_dt).unwrap();
            let old_span = (samples.len() - 1) as f64 * old_dt;
            let new_span = (out.len() - 1) as f64 * new_dt;
            assert!(new_span <= old_span + 1e-12);
            assert!(old_span - new_span < new_dt);
        }
    }

    #[test]
    fn sine_downsample_matches_analytic() {
        let old_dt = 1.0 / 4096.0;
        let f = 40.0;
        let samples: Vec<f64> = (0..4096)
            .map(|i| (2.0 * std::f64::consts::PI * f * i as f64 * old_dt).sin())
            .collect();
        let new_dt = 1.0 / 1024.0;
        let out = resample_uniform(&samples, old_dt, new_dt).unwrap();
        for (i, v) in out.iter().enumerate().skip(2).take(out.len() - 4) {
            let expected = (2.0 * std::f64::consts::PI * f * i as f64 * new_dt).sin();
            assert!((v - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn too_short_input_rejected() {
        assert!(matches!(
            resample_uniform(&[1.0], 0.1, 0.2),
            Err(MatchError::InsufficientData { .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn duration_always_within_one_sample(
                len in 8_usize..512,
                old_dt in 1e-5_f64..1e-2,
                ratio in 0.3_f64..3.0,
            ) {
                let samples: Vec<f64> = (0..len).map(|i| (i as f64 * 0.1).cos()).collect();
                let new_dt = old_dt * ratio;
                let out = resample_uniform(&samples, old_dt, new_dt).unwrap();
                let old_span = (len - 1) as f64 * old_dt;
                let new_span = (out.len() - 1) as f64 * new_dt;
                prop_assert!(new_span <= old_span + 1e-12);
                prop_assert!(old_span - new_span < new_dt);
            }
        }
    }
}
