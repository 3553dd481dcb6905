// Domain layer: registration entities, the layout tree and the ports the stores read from.

pub mod model;
pub mod ports;
pub mod tree;
