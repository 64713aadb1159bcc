pub mod controller;
pub mod route_list;

pub use controller::scan_controller_actions;
pub use route_list::parse_route_list;
