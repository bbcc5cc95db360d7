pub mod list;
mod page;
pub mod spend;
pub mod state;
mod tabs;
pub mod view_model;

pub use page::CustomersPage;
