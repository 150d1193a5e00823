/// Highest frequency covered by the coarse aperiodicity bands [Hz].
pub const UPPER_LIMIT: f64 = 15000.0;
/// Width of one coarse aperiodicity band [Hz].
pub const FREQUENCY_INTERVAL: f64 = 3000.0;

/// Aperiodicity pinned at 0 Hz before expansion [dB].
pub const APERIODICITY_FLOOR_DB: f64 = -60.0;
/// Aperiodicity pinned at Nyquist before expansion [dB].
pub const APERIODICITY_CEILING_DB: f64 = 0.0;

/// Frame shift [ms].
pub const DEFAULT_FRAME_PERIOD: f64 = 5.0;
