pub mod params;

pub use params::{CheckForm, CheckRequest, DashboardParams, ErrorBody};
