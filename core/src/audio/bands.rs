//! Per-tick loudness snapshot.

use crate::layout::CAP;

/// Number of frequency bands in a snapshot, one per slot.
pub const BAND_COUNT: usize = CAP;

/// Loudness read from an audio stream for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioSnapshot {
    /// Mean level of all bins, 0..=1.
    pub volume: f32,
    /// Mean level of each band, 0..=1.
    pub bands: [f32; BAND_COUNT],
}

impl AudioSnapshot {
    pub fn silent() -> Self {
        Self::default()
    }

    /// Snapshot with a fixed volume and empty bands.
    pub fn with_volume(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            bands: [0.0; BAND_COUNT],
        }
    }

    /// Build a snapshot from byte-scaled frequency bins.
    ///
    /// Bands are `bins.len() / BAND_COUNT` wide; trailing bins that don't fill
    /// a band count toward volume only.
    pub fn from_bins(bins: &[u8]) -> Self {
        if bins.is_empty() {
            return Self::silent();
        }

        let sum: u32 = bins.iter().map(|&b| b as u32).sum();
        let volume = sum as f32 / bins.len() as f32 / 255.0;

        let band_size = bins.len() / BAND_COUNT;
        let mut bands = [0.0; BAND_COUNT];
        if band_size > 0 {
            for (k, band) in bands.iter_mut().enumerate() {
                let start = k * band_size;
                let chunk = &bins[start..start + band_size];
                let total: u32 = chunk.iter().map(|&b| b as u32).sum();
                *band = total as f32 / band_size as f32 / 255.0;
            }
        }

        Self { volume, bands }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scale_bins() {
        let snapshot = AudioSnapshot::from_bins(&[255; 128]);
        assert_eq!(snapshot.volume, 1.0);
        assert!(snapshot.bands.iter().all(|&b| b == 1.0));
    }

    #[test]
    fn test_remainder_bins_excluded_from_bands() {
        // 128 bins -> 9 per band, bins 126 and 127 belong to no band
        let mut bins = [0u8; 128];
        bins[126] = 255;
        bins[127] = 255;
        let snapshot = AudioSnapshot::from_bins(&bins);
        assert!(snapshot.bands.iter().all(|&b| b == 0.0));
        assert!((snapshot.volume - 2.0 / 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_band_averages() {
        let mut bins = [0u8; 128];
        for b in bins.iter_mut().take(9) {
            *b = 51;
        }
        let snapshot = AudioSnapshot::from_bins(&bins);
        assert!((snapshot.bands[0] - 0.2).abs() < 1e-6);
        assert_eq!(snapshot.bands[1], 0.0);
    }

    #[test]
    fn test_empty_and_short_bins() {
        assert_eq!(AudioSnapshot::from_bins(&[]), AudioSnapshot::silent());
        let short = AudioSnapshot::from_bins(&[255; 10]);
        assert_eq!(short.volume, 1.0);
        assert!(short.bands.iter().all(|&b| b == 0.0));
    }
}
