pub mod action;
pub mod lens;
pub mod route;

pub use action::ControllerAction;
pub use lens::CodeLensItem;
pub use route::{RouteInfo, RouteTable};
