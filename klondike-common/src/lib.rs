pub mod animation;
pub mod assets;
pub mod board;
pub mod card;
pub mod config;
pub mod history;
pub mod layout;
pub mod rules;
pub mod session;
pub mod trace;
