//! Controller layer: routing UI actions onto the booking worker's queue.

pub mod orchestration;
