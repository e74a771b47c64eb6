pub(crate) mod analysis_controller;
pub(crate) mod health_check_controller;
