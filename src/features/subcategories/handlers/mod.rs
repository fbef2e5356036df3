pub mod subcategory_handler;

pub use subcategory_handler::{
    __path_create_subcategory, __path_delete_subcategory, __path_get_subcategory,
    __path_list_children, __path_list_flat_by_category, __path_list_root_by_category,
    __path_list_subcategories, __path_update_subcategory, create_subcategory, delete_subcategory,
    get_subcategory, list_children, list_flat_by_category, list_root_by_category,
    list_subcategories, update_subcategory,
};
