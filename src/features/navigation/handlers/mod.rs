pub mod navigation_handler;

pub use navigation_handler::{
    __path_get_admin_structure, __path_get_landing, __path_get_navigation, get_admin_structure,
    get_landing, get_navigation,
};
