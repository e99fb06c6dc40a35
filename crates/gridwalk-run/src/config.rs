//! [`RunConfig`]: algorithm choice and pacing for one run.

use std::time::Duration;

use gridwalk_core::Error;
use gridwalk_search::AlgorithmKind;

/// Smallest accepted pacing delay, in milliseconds.
pub const MIN_SPEED_MILLIS: u64 = 1;
/// Largest accepted pacing delay, in milliseconds.
pub const MAX_SPEED_MILLIS: u64 = 50;
/// Pacing used by [`RunConfig::default`].
pub const DEFAULT_SPEED_MILLIS: u64 = 10;

/// Configuration for starting a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    pub algorithm: AlgorithmKind,
    /// Delay after every applied step, `MIN_SPEED_MILLIS..=MAX_SPEED_MILLIS`.
    pub speed_millis: u64,
}

impl RunConfig {
    pub fn new(algorithm: AlgorithmKind, speed_millis: u64) -> Self {
        Self {
            algorithm,
            speed_millis,
        }
    }

    /// Reject a pacing delay outside the accepted range.
    pub fn validate(&self) -> Result<(), Error> {
        if (MIN_SPEED_MILLIS..=MAX_SPEED_MILLIS).contains(&self.speed_millis) {
            Ok(())
        } else {
            Err(Error::InvalidConfig {
                speed_millis: self.speed_millis,
            })
        }
    }

    /// The pacing delay as a [`Duration`].
    #[inline]
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.speed_millis)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(AlgorithmKind::default(), DEFAULT_SPEED_MILLIS)
    }
}
