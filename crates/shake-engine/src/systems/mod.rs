pub mod screen;
pub mod countdown;
pub mod scorer;
pub mod feedback;
pub mod confetti;
pub mod partner;
pub mod rng;
