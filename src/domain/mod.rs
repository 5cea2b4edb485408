// Domain layer: service models, the XMLMC request shape and the ports the core depends on.

pub mod model;
pub mod ports;
pub mod request;
