use rand::Rng;

use crate::consts::{CAN_CHANNELS_REFRESH, UPDATE_INTERVAL_MS};
use crate::core::{EnginePhase, EngineStatus};

/// Clamped truncation of a formula result into a byte-wide field.
///
/// The derived-field formulas produce floating point values that can leave
/// the 8-bit range at high engine speeds. Out-of-range results saturate at
/// the field bounds instead of wrapping.
#[inline]
fn narrow(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// State-machine driven engine parameter simulator.
///
/// The simulator owns the state that persists between update calls: the
/// current operating phase and the timestamp of the last committed update.
/// The telemetry record itself stays with the caller and is mutated in
/// place. The caller supplies the clock and the random source, so nothing
/// in here can fail.
pub struct EngineSimulator {
    /// Current operating phase.
    phase: EnginePhase,
    /// Timestamp of the last committed update, in milliseconds.
    last_update: Option<u64>,
}

impl EngineSimulator {
    /// Construct a new simulator in the startup phase.
    pub fn new() -> Self {
        Self {
            phase: EnginePhase::Startup,
            last_update: None,
        }
    }

    /// Current operating phase.
    #[inline]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Advance the simulation by one cycle.
    ///
    /// This method is expected to be called on every iteration of the
    /// caller's loop. Until [`UPDATE_INTERVAL_MS`] milliseconds have passed
    /// since the last committed update it returns `false` and leaves the
    /// record and the hidden state untouched.
    ///
    /// A committed update first evaluates the phase advance condition
    /// against the previously committed coolant temperature and RPM, then
    /// samples fresh RPM and coolant values from the resulting phase and
    /// recomputes every RPM-derived field. Half of the auxiliary CAN
    /// channels are redrawn per cycle, the other half keep their value.
    ///
    /// Returns `true` when the update was committed.
    pub fn update(&mut self, status: &mut EngineStatus, now: u64, rng: &mut impl Rng) -> bool {
        if let Some(last) = self.last_update {
            if now.saturating_sub(last) < UPDATE_INTERVAL_MS {
                return false;
            }
        }

        let next = self.phase.next(status);
        if next != self.phase {
            trace!("Engine phase {} -> {}", self.phase, next);
            self.phase = next;
        }

        let rpm = rng.gen_range(self.phase.rpm_range());
        status.set_rpm(rpm);
        status.clt = rng.gen_range(self.phase.clt_range());

        self.derive_from_rpm(status, rpm);

        status.secl = (now / 1_000) as u8;
        status.status1 = 0;
        status.engine = 1;
        status.test_outputs = 0;

        status.iat = rng.gen_range(30..50);
        status.bat_correction = rng.gen_range(120..140);
        status.ego_correction = rng.gen_range(120..140);
        status.iat_correction = rng.gen_range(120..140);
        status.wue = rng.gen_range(120..140);
        status.tae_amount = rng.gen_range(120..140);
        status.gamma_e = rng.gen_range(120..140);
        status.tps_dot = rng.gen_range(120..140);
        status.loops_lo = rng.gen_range(120..140);
        status.loops_hi = rng.gen_range(120..140);
        status.free_ram_lo = rng.gen_range(120..140);
        status.free_ram_hi = rng.gen_range(120..140);
        status.tps_adc = rng.gen_range(120..140);

        for channel in status.can_in[..CAN_CHANNELS_REFRESH].iter_mut() {
            *channel = rng.gen_range(120..140);
        }

        status.errors = rng.gen_range(0..3);

        self.last_update = Some(now);

        true
    }

    /// Recompute the telemetry fields that follow the engine speed.
    fn derive_from_rpm(&self, status: &mut EngineStatus, rpm: u16) {
        let r = f32::from(rpm);

        status.tps = narrow(0.01 * r);

        let load = narrow(80.0 + 0.00002 * r * r);
        status.idle_load = load;
        status.boost_target = load;
        status.ve = load;
        status.map_lo = load;
        status.map_hi = load;

        let advance = narrow(10.0 + 0.002 * r);
        status.advance = advance;
        status.dwell = advance;

        status.battery_v = narrow(12.0 + 0.0003 * r);

        let o2 = narrow(0.9 + 0.00005 * r);
        status.o2 = o2;
        status.o2_2 = o2;

        status.afr_target = narrow(14.0 - 0.0003 * r);

        status.pw1_lo = narrow(1.0 + 0.0005 * r);
        status.pw1_hi = narrow(5.0 + 0.0005 * r);

        status.boost_duty = narrow(0.01 * r);
        status.spark = narrow(0.036 * r);

        let rpm_dot = narrow(0.1 * r);
        status.rpm_dot_lo = rpm_dot;
        status.rpm_dot_hi = rpm_dot;

        let flex = narrow(0.01 * r);
        status.ethanol_pct = flex;
        status.flex_correction = flex;
        status.flex_ign_correction = flex;

        status.baro = narrow(100.0 + 0.0001 * r);
    }
}

impl Default for EngineSimulator {
    fn default() -> Self {
        Self::new()
    }
}
