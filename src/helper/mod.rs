pub mod swap_helper;
