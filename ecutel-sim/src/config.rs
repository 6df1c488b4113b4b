use ecutel::{Configurable, GlobalConfig};

#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Poll interval of the simulation loop in milliseconds.
    pub tick_interval: u64,
    /// Global configuration.
    pub global: GlobalConfig,
}

impl Configurable for SimConfig {
    fn global(&self) -> &GlobalConfig {
        &self.global
    }
}
