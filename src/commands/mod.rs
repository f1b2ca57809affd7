pub mod activate;
pub mod available;
pub mod current;
pub mod install;
pub mod list;
pub mod uninstall;
