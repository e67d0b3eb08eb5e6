// Record Builder: the HTML form, its multipart decoding and the download routes.

pub mod form;
pub mod form_page;
pub mod handlers;
