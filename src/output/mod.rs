pub mod formatter;

pub use formatter::{format_branches, format_repo_entry, format_repo_list, should_use_colors};
