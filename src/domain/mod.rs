// Domain layer: catalog, request/response models and ports. No HTTP types here.

pub mod catalog;
pub mod execution;
pub mod model;
pub mod ports;
