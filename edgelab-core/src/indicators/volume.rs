//! Volume statistics — trailing mean and spike flag.
//!
//! Warm-up: the first `window - 1` mean values are undefined; the spike
//! flag is false until the mean is defined.

/// Trailing mean of volume over `window`.
pub fn volume_sma(volumes: &[u64], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 1, "volume window must be >= 1");
    let n = volumes.len();
    let mut out = vec![None; n];
    if n < window {
        return out;
    }

    let mut sum: f64 = volumes[..window].iter().map(|&v| v as f64).sum();
    out[window - 1] = Some(sum / window as f64);
    for i in window..n {
        sum += volumes[i] as f64 - volumes[i - window] as f64;
        out[i] = Some(sum / window as f64);
    }

    out
}

/// Spike flag: volume strictly above `factor` times its trailing mean.
pub fn volume_spike(volumes: &[u64], ma: &[Option<f64>], factor: f64) -> Vec<bool> {
    assert_eq!(volumes.len(), ma.len(), "volume columns must align");
    volumes
        .iter()
        .zip(ma)
        .map(|(&v, m)| m.map(|m| v as f64 > factor * m).unwrap_or(false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn volume_sma_basic() {
        let result = volume_sma(&[100, 200, 300, 400], 2);
        assert!(result[0].is_none());
        assert_approx(result[1].unwrap(), 150.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 250.0, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 350.0, DEFAULT_EPSILON);
    }

    #[test]
    fn spike_requires_defined_mean() {
        let volumes = [1000, 1000, 5000];
        let ma = volume_sma(&volumes, 2);
        let spikes = volume_spike(&volumes, &ma, 2.0);
        assert!(!spikes[0]); // mean undefined
        assert!(!spikes[1]);
        assert!(spikes[2]); // 5000 > 2 * 1000
    }

    #[test]
    fn no_spike_on_flat_volume() {
        let volumes = [1000; 5];
        let ma = volume_sma(&volumes, 3);
        assert!(volume_spike(&volumes, &ma, 2.0).iter().all(|&s| !s));
    }
}
