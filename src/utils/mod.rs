pub mod text;

pub use text::{non_blank, non_blank_field, truncate_with_ellipsis};
