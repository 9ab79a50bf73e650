pub mod autostart;
pub mod banner;
pub mod doctor;
pub mod init;
pub mod menu;
pub mod set;
pub mod startup;
pub mod status;
