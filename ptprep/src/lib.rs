pub mod app;
pub mod cleanup;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod trim;
pub mod validation;
pub mod zone;
