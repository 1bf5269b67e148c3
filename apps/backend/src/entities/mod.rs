pub mod agents;
pub mod chat_messages;
pub mod games;
pub mod offers;
pub mod paint_stocks;
pub mod tiles;
