pub mod constants;
pub mod engine;
pub mod error;
pub mod input;
pub mod links;
pub mod particle;
pub mod persist;
pub mod physics;
pub mod pointer;
pub mod render;
pub mod scale;
pub mod settings;
pub mod time;

pub use engine::Starfield;
pub use error::{Result, StarfieldError};
pub use input::{command_for_key, InputEvent, InputQueue, KeyCommand, KeyboardImpulse};
pub use links::{LinkBuilder, LinkSegment};
pub use particle::{Particle, PoolOrigin};
pub use persist::{MemoryStore, PersistedMeta, StateStore};
pub use pointer::PointerTracker;
pub use render::{RecordingSurface, Rgba, RingStyle, StarSprite, Surface};
pub use scale::ScaleFactors;
pub use settings::{SettingKey, Settings};
pub use time::{normalize_event_timestamp, Clock, InstantClock};
