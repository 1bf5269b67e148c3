pub mod agents;
pub mod chat;
pub mod games;
pub mod offers;
pub mod paint;
pub mod tiles;
