pub use self::phase::EnginePhase;
pub use self::status::EngineStatus;

mod phase;
mod status;
