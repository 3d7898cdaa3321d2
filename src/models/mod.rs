pub mod coordinates;
pub mod notification;
pub mod poi;
pub mod position;

pub use coordinates::{distance, Coordinates};
pub use notification::NotificationEvent;
pub use poi::{Poi, PoiCategory};
pub use position::{Direction, Mode, PositionSample};
