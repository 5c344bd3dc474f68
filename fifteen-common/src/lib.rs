//! Shared types for the 15-puzzle: the immutable [`board::Board`], the four
//! blank [`moves::Move`]s and the two [`goal::Goal`] configurations.
pub mod board;
pub mod goal;
pub mod moves;
