pub mod records;
pub mod theme;
pub mod view;
