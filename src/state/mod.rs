pub mod click_flash;

pub use click_flash::ClickFlash;
