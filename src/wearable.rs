//! Simulated wearable heart-rate sensor.
//!
//! Pairing takes a short delay and then reports a resting heart rate between
//! 60 and 120 bpm. There is no device protocol behind it.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Lowest heart rate the simulated sensor reports.
pub const MIN_HEART_RATE: u16 = 60;

/// Highest heart rate the simulated sensor reports.
pub const MAX_HEART_RATE: u16 = 120;

/// A paired wearable and its last reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wearable {
    pub connected: bool,
    pub heart_rate: u16,
}

/// Pairs with the simulated wearable after `delay`.
pub async fn connect(delay: Duration) -> Wearable {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let heart_rate = read_heart_rate(&mut rand::thread_rng());
    info!(heart_rate, "Wearable connected");
    Wearable {
        connected: true,
        heart_rate,
    }
}

/// Draws one heart-rate reading.
pub fn read_heart_rate<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(MIN_HEART_RATE..=MAX_HEART_RATE)
}
