use serde::{Deserialize, Deserializer};
use trainlog_domain::{RestKind, TimePeriod};

pub const MAX_BEEP_VOLUME: u8 = 100;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Percentage in `0..=MAX_BEEP_VOLUME`. Larger stored values are clamped when loading.
    #[serde(deserialize_with = "deserialize_beep_volume")]
    pub beep_volume: u8,
    pub rest_timer_cues: bool,
    pub set_rest_seconds: i64,
    pub exercise_rest_seconds: i64,
    #[serde(with = "TimePeriodDef")]
    pub default_time_period: TimePeriod,
}

impl Settings {
    /// Rest duration used for exercises without a configured rest.
    #[must_use]
    pub fn rest_seconds(&self, kind: RestKind) -> i64 {
        match kind {
            RestKind::Set => self.set_rest_seconds,
            RestKind::Exercise => self.exercise_rest_seconds,
        }
    }

    #[must_use]
    pub fn beep_gain(&self) -> f32 {
        f32::from(self.beep_volume.min(MAX_BEEP_VOLUME)) / f32::from(MAX_BEEP_VOLUME)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beep_volume: 80,
            rest_timer_cues: true,
            set_rest_seconds: 90,
            exercise_rest_seconds: 180,
            default_time_period: TimePeriod::Month,
        }
    }
}

fn deserialize_beep_volume<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    u8::deserialize(deserializer).map(|volume| volume.min(MAX_BEEP_VOLUME))
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(remote = "TimePeriod")]
enum TimePeriodDef {
    Week,
    Month,
}
