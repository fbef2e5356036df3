pub mod document_handler;

pub use document_handler::{
    __path_create_document, __path_delete_document, __path_get_document,
    __path_get_document_content, __path_get_published_document, __path_list_documents,
    __path_list_subcategory_documents, __path_quick_edit_document, __path_update_document,
    create_document, delete_document, get_document, get_document_content,
    get_published_document, list_documents, list_subcategory_documents, quick_edit_document,
    update_document,
};
