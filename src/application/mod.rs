//! Application layer: the `OutpaintSession` engine that drives one user
//! session through normalize, stage, payment gate, dispatch and result
//! publication, awaiting each step so attempts stay strictly serial.

pub mod workflow;
