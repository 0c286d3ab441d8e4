pub(crate) mod cart;
pub(crate) mod config;
pub(crate) mod menu;
pub(crate) mod order;
