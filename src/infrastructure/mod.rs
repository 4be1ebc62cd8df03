pub mod nui;
pub mod rendering;
pub mod services;
