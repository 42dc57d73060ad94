pub mod backdrop;
pub mod helpers;
pub mod overlay;
pub mod preview;
pub mod result_list;
