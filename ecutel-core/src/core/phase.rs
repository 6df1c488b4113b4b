use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::EngineStatus;

/// Coarse engine operating regime.
///
/// The phase determines the ranges the simulator samples RPM and coolant
/// temperature from, and when the engine moves on to the next regime. The
/// phase is hidden simulator state and not part of the telemetry record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Engine is cranking and coming up to idle speed.
    Startup = 0x00,
    /// Engine idles while the coolant warms up.
    Idling = 0x01,
    /// Engine spins up under load.
    Acceleration = 0x02,
    /// Engine runs near the top of its speed range.
    HighRpm = 0x03,
    /// Engine winds down towards idle.
    Deceleration = 0x04,
}

impl EnginePhase {
    /// RPM sample range for this phase.
    pub fn rpm_range(&self) -> Range<u16> {
        match self {
            EnginePhase::Startup => 800..1_200,
            EnginePhase::Idling => 800..1_000,
            EnginePhase::Acceleration => 1_000..3_000,
            EnginePhase::HighRpm => 3_000..7_000,
            EnginePhase::Deceleration => 1_000..3_000,
        }
    }

    /// Coolant temperature sample range for this phase.
    pub fn clt_range(&self) -> Range<u8> {
        match self {
            EnginePhase::Startup => 30..50,
            EnginePhase::Idling => 50..70,
            EnginePhase::Acceleration => 70..90,
            EnginePhase::HighRpm => 80..100,
            EnginePhase::Deceleration => 70..90,
        }
    }

    /// Evaluate the advance condition against the last committed telemetry.
    ///
    /// Returns the successor phase when the condition holds, otherwise the
    /// current phase. Startup always advances; the other phases gate on the
    /// coolant temperature or the merged RPM of the previous update.
    pub fn next(&self, status: &EngineStatus) -> Self {
        match self {
            EnginePhase::Startup => EnginePhase::Idling,
            EnginePhase::Idling if status.clt > 60 => EnginePhase::Acceleration,
            EnginePhase::Acceleration if status.rpm() > 2_500 => EnginePhase::HighRpm,
            EnginePhase::HighRpm if status.rpm() < 3_500 => EnginePhase::Deceleration,
            EnginePhase::Deceleration if status.rpm() < 1_500 => EnginePhase::Idling,
            phase => *phase,
        }
    }
}

impl TryFrom<u8> for EnginePhase {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(EnginePhase::Startup),
            0x01 => Ok(EnginePhase::Idling),
            0x02 => Ok(EnginePhase::Acceleration),
            0x03 => Ok(EnginePhase::HighRpm),
            0x04 => Ok(EnginePhase::Deceleration),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnginePhase::Startup => write!(f, "Startup"),
            EnginePhase::Idling => write!(f, "Idling"),
            EnginePhase::Acceleration => write!(f, "Acceleration"),
            EnginePhase::HighRpm => write!(f, "High RPM"),
            EnginePhase::Deceleration => write!(f, "Deceleration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_discriminant() {
        assert_eq!(EnginePhase::try_from(0x00).unwrap(), EnginePhase::Startup);
        assert_eq!(EnginePhase::try_from(0x01).unwrap(), EnginePhase::Idling);
        assert_eq!(
            EnginePhase::try_from(0x02).unwrap(),
            EnginePhase::Acceleration
        );
        assert_eq!(EnginePhase::try_from(0x03).unwrap(), EnginePhase::HighRpm);
        assert_eq!(
            EnginePhase::try_from(0x04).unwrap(),
            EnginePhase::Deceleration
        );
        assert!(EnginePhase::try_from(0x05).is_err());
    }

    #[test]
    fn test_startup_always_advances() {
        let status = EngineStatus::new();

        assert_eq!(EnginePhase::Startup.next(&status), EnginePhase::Idling);
    }

    #[test]
    fn test_idling_gates_on_coolant() {
        let mut status = EngineStatus::new();

        status.clt = 60;
        assert_eq!(EnginePhase::Idling.next(&status), EnginePhase::Idling);

        status.clt = 61;
        assert_eq!(EnginePhase::Idling.next(&status), EnginePhase::Acceleration);
    }

    #[test]
    fn test_acceleration_gates_on_rpm() {
        let mut status = EngineStatus::new();

        status.set_rpm(2_500);
        assert_eq!(
            EnginePhase::Acceleration.next(&status),
            EnginePhase::Acceleration
        );

        status.set_rpm(2_501);
        assert_eq!(
            EnginePhase::Acceleration.next(&status),
            EnginePhase::HighRpm
        );
    }

    #[test]
    fn test_high_rpm_gates_on_rpm() {
        let mut status = EngineStatus::new();

        status.set_rpm(3_500);
        assert_eq!(EnginePhase::HighRpm.next(&status), EnginePhase::HighRpm);

        status.set_rpm(3_499);
        assert_eq!(
            EnginePhase::HighRpm.next(&status),
            EnginePhase::Deceleration
        );
    }

    #[test]
    fn test_deceleration_gates_on_rpm() {
        let mut status = EngineStatus::new();

        status.set_rpm(1_500);
        assert_eq!(
            EnginePhase::Deceleration.next(&status),
            EnginePhase::Deceleration
        );

        status.set_rpm(1_499);
        assert_eq!(EnginePhase::Deceleration.next(&status), EnginePhase::Idling);
    }
}
