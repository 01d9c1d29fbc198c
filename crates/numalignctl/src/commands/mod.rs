pub mod evaluate;
pub mod policies;
