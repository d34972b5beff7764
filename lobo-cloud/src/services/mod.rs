//! Business services composed from the db layer and the achievement engine

pub mod achievements;
