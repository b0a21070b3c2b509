// Domain layer: records, per-store outcomes and the ports the pipeline depends on.

pub mod model;
pub mod ports;
