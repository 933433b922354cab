pub(crate) mod dsl;
pub(crate) mod layout;
pub(crate) mod model;
