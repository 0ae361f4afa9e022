//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (simulated time advances once per tick)
//! - Seeded RNG only, passed down explicitly
//! - Stable iteration order (registration order)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod debris;
pub mod entity;
pub mod motion;
pub mod outline;
pub mod raider;
pub mod registry;
pub mod ship;
pub mod state;
pub mod tick;
pub mod timer;

pub use asteroid::{Asteroid, AsteroidSize};
pub use bullet::Bullet;
pub use collision::{Bounds, contains_point, polygons_overlap, segments_intersect};
pub use debris::Debris;
pub use entity::{Category, Contact, Effects, Entity, EntityKind, Env, GameEvent, Tags};
pub use motion::Motion;
pub use outline::Outline;
pub use raider::{Raider, RaiderSize};
pub use registry::{EntityId, Registry};
pub use ship::Ship;
pub use state::{Director, GamePhase, Intent, Intents};
pub use timer::{DeferredAction, DeferredTimer, TimerQueue};
