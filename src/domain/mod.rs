// Domain layer: models and ports (interfaces). No dependencies on concrete
// backends.

pub mod model;
pub mod ports;
