pub mod map_view;
pub mod position;
pub mod presenter;
pub mod proximity;
pub mod registry;
pub mod session;
