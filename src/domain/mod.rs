//! Domain layer: the workflow's core types and rules, free of any HTTP or
//! filesystem knowledge. External collaborators are reached only through
//! the ports in [`ports`].

pub mod blob;
pub mod image;
pub mod location;
pub mod payment;
pub mod ports;
