// Domain layer: cart model and the ports the cart talks through. No I/O here.

pub mod model;
pub mod ports;
