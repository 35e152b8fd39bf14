//! Implementations of the frame extension traits

mod grouping;
