// UI module - console front-end for the hero
//
// This module contains:
// - HeroFrame: Pure render model derived from HeroState
// - ConsoleController: Command loop that wires terminal input to state and services

pub mod controller;
pub mod render;

pub use controller::{Command, CommandError, ConsoleController, Flow};
pub use render::{HeroFrame, NotificationPanel};
