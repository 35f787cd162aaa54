// Domain layer: page models and the ports the rest of the crate plugs into.

pub mod model;
pub mod ports;
