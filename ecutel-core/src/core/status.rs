use serde::{Deserialize, Serialize};

use crate::consts::CAN_CHANNELS;

/// Real-time engine telemetry record.
///
/// This is the single boundary artifact of the simulator: a flat aggregate
/// of independent byte-wide readings, mutated in place on every committed
/// update. Field order and width form the layout a downstream serializer
/// would depend on. No cross-field consistency is enforced beyond the RPM
/// byte pair, which can be merged through [`EngineStatus::rpm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    /// Command response tag.
    pub response: i8,
    /// Seconds counter.
    pub secl: u8,
    /// General status flags.
    pub status1: u8,
    /// Engine status flags.
    pub engine: u8,
    /// Ignition dwell time.
    pub dwell: u8,
    /// Low byte of manifold absolute pressure.
    pub map_lo: u8,
    /// High byte of manifold absolute pressure.
    pub map_hi: u8,
    /// Intake air temperature.
    pub iat: u8,
    /// Coolant temperature.
    pub clt: u8,
    /// Battery correction in percent.
    pub bat_correction: u8,
    /// Battery voltage, scaled.
    pub battery_v: u8,
    /// Primary oxygen sensor value.
    pub o2: u8,
    /// Exhaust gas oxygen correction in percent.
    pub ego_correction: u8,
    /// Intake air temperature correction in percent.
    pub iat_correction: u8,
    /// Warm-up enrichment in percent.
    pub wue: u8,
    /// Low byte of RPM.
    pub rpm_lo: u8,
    /// High byte of RPM.
    pub rpm_hi: u8,
    /// Throttle angle enrichment amount in percent.
    pub tae_amount: u8,
    /// Exhaust gas recirculation correction in percent.
    pub gamma_e: u8,
    /// Volumetric efficiency in percent.
    pub ve: u8,
    /// Air-fuel ratio target.
    pub afr_target: u8,
    /// Low byte of injector pulse width.
    pub pw1_lo: u8,
    /// High byte of injector pulse width.
    pub pw1_hi: u8,
    /// Throttle position rate of change.
    pub tps_dot: u8,
    /// Ignition advance.
    pub advance: u8,
    /// Throttle position sensor value.
    pub tps: u8,
    /// Low byte of control loop counter.
    pub loops_lo: u8,
    /// High byte of control loop counter.
    pub loops_hi: u8,
    /// Low byte of free RAM.
    pub free_ram_lo: u8,
    /// High byte of free RAM.
    pub free_ram_hi: u8,
    /// Boost pressure target.
    pub boost_target: u8,
    /// Boost duty cycle.
    pub boost_duty: u8,
    /// Spark flags.
    pub spark: u8,
    /// Low byte of RPM rate of change.
    pub rpm_dot_lo: u8,
    /// High byte of RPM rate of change.
    pub rpm_dot_hi: u8,
    /// Ethanol percentage.
    pub ethanol_pct: u8,
    /// Flex fuel correction, percent above or below 100.
    pub flex_correction: u8,
    /// Flex fuel ignition correction, degrees of advance.
    pub flex_ign_correction: u8,
    /// Idle load.
    pub idle_load: u8,
    /// Test output flags.
    pub test_outputs: u8,
    /// Secondary oxygen sensor value.
    pub o2_2: u8,
    /// Barometric pressure.
    pub baro: u8,
    /// Auxiliary CAN input channels.
    pub can_in: [u8; CAN_CHANNELS],
    /// Throttle position sensor ADC value.
    pub tps_adc: u8,
    /// Synthetic error code.
    pub errors: u8,
}

impl EngineStatus {
    /// Command response tag for an acknowledged request.
    pub const RESPONSE_ACK: i8 = b'A' as i8;

    /// Construct a zeroed telemetry record.
    ///
    /// Every field is set to zero except the response tag, which carries
    /// the acknowledge sentinel.
    pub fn new() -> Self {
        Self {
            response: Self::RESPONSE_ACK,
            secl: 0,
            status1: 0,
            engine: 0,
            dwell: 0,
            map_lo: 0,
            map_hi: 0,
            iat: 0,
            clt: 0,
            bat_correction: 0,
            battery_v: 0,
            o2: 0,
            ego_correction: 0,
            iat_correction: 0,
            wue: 0,
            rpm_lo: 0,
            rpm_hi: 0,
            tae_amount: 0,
            gamma_e: 0,
            ve: 0,
            afr_target: 0,
            pw1_lo: 0,
            pw1_hi: 0,
            tps_dot: 0,
            advance: 0,
            tps: 0,
            loops_lo: 0,
            loops_hi: 0,
            free_ram_lo: 0,
            free_ram_hi: 0,
            boost_target: 0,
            boost_duty: 0,
            spark: 0,
            rpm_dot_lo: 0,
            rpm_dot_hi: 0,
            ethanol_pct: 0,
            flex_correction: 0,
            flex_ign_correction: 0,
            idle_load: 0,
            test_outputs: 0,
            o2_2: 0,
            baro: 0,
            can_in: [0; CAN_CHANNELS],
            tps_adc: 0,
            errors: 0,
        }
    }

    /// Engine speed merged from the RPM byte pair.
    #[inline]
    pub fn rpm(&self) -> u16 {
        u16::from_be_bytes([self.rpm_hi, self.rpm_lo])
    }

    /// Store the engine speed split across the RPM byte pair.
    #[inline]
    pub fn set_rpm(&mut self, rpm: u16) {
        let bytes = rpm.to_be_bytes();
        self.rpm_hi = bytes[0];
        self.rpm_lo = bytes[1];
    }
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RPM: {} CLT: {} IAT: {} TPS: {}% MAP: {} Battery: {} AFR target: {} Errors: {}",
            self.rpm(),
            self.clt,
            self.iat,
            self.tps,
            self.map_lo,
            self.battery_v,
            self.afr_target,
            self.errors
        )
    }
}
