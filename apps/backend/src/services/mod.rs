pub mod agents;
pub mod chat;
pub mod economy;
pub mod games;
pub mod marketplace;
pub mod painting;
