pub(crate) mod controller;
pub(crate) mod motion;
pub(crate) mod surface;
