//! Shaman Sphere - colony simulation on the surface of a small planet

pub mod city;
pub mod command;
pub mod core;
pub mod ecs;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;
