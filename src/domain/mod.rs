// Domain layer: models and ports. No filesystem or subprocess access here.

pub mod model;
pub mod ports;
