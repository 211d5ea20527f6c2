// Domain layer - Value objects and analysis policies

pub mod errors;
pub mod model;
pub mod rules;
