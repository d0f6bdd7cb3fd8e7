// Domain layer: core models, the API wire schema and ports (interfaces).

pub mod model;
pub mod ports;
pub mod response;
