pub mod settings_handler;

pub use settings_handler::{
    __path_delete_setting, __path_get_public_settings, __path_list_settings,
    __path_update_setting, delete_setting, get_public_settings, list_settings, update_setting,
};
