//! Infrastructure services

mod policy_advisor;

pub use policy_advisor::{PolicyAdvisor, PolicyAdvisorDeps};
